use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use lathe_geometry::{bounds, total_points};
use lathe_pipeline::{
	registry::TaskRegistry,
	runner::{spawn_job, JobEventKind},
	spec::PipelineSpec,
};
use lathe_scan::{context::ScanContext, data::ScanData};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::debug;

mod config;
use config::LathecConfig;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
	#[command(subcommand)]
	command: Commands,

	#[arg(long, default_value = "lathe.toml")]
	config: PathBuf,
}

#[derive(Debug, Subcommand)]
enum Commands {
	New {
		target_dir: Option<PathBuf>,
	},
	Tasks,
	Run {
		pipeline: String,

		/// Cancel the job after this many seconds
		#[arg(long)]
		timeout: Option<u64>,
	},
}

const EXAMPLE_PIPELINE: &str = include_str!("./example-pipeline.toml");

fn main() -> Result<()> {
	let cli = Args::parse();

	let config = LathecConfig::load_or_default(&cli.config)
		.map_err(|error| anyhow!("could not read config `{}`: {error}", cli.config.display()))?;

	// We cannot log before this point
	tracing_subscriber::fmt()
		.with_env_filter(config.logging.to_env_filter())
		.without_time()
		.with_ansi(true)
		.init();

	match cli.command {
		Commands::New { target_dir } => cmd_new(target_dir),
		Commands::Tasks => cmd_tasks(),
		Commands::Run { pipeline, timeout } => cmd_run(&config, &pipeline, timeout),
	}
}

/// Every task type this client can put in a pipeline
fn task_registry() -> Result<TaskRegistry<ScanData, ScanContext>> {
	let mut registry = TaskRegistry::new();

	{
		// Scan-processing tasks
		lathe_scan::register(&mut registry)?;
	}

	{
		// Load & save tasks
		lathe_formats::register(&mut registry)?;
	}

	return Ok(registry);
}

fn cmd_new(target_dir: Option<PathBuf>) -> Result<()> {
	let root = if let Some(p) = target_dir {
		p
	} else {
		PathBuf::from(".")
	};

	if root.is_dir() {
		if root.read_dir()?.next().is_some() {
			println!("Target directory isn't empty");
			return Ok(());
		}
	} else if root.exists() {
		println!("Target exists and isn't a directory");
		return Ok(());
	} else {
		std::fs::create_dir(&root)?;
	}

	LathecConfig::create_default_config(&root.join("lathe.toml"))?;

	let pipeline_dir = root.join("pipelines");
	std::fs::create_dir(&pipeline_dir)?;
	std::fs::write(pipeline_dir.join("example.toml"), EXAMPLE_PIPELINE)?;

	std::fs::create_dir(root.join("settings"))?;

	println!(
		"Set up a scan project in {}",
		root.display().to_string().bold()
	);
	println!(
		"Try {} once you have a {} to thin out.",
		"lathec run example".cyan(),
		"scan.xyz".italic()
	);
	return Ok(());
}

fn cmd_tasks() -> Result<()> {
	let registry = task_registry()?;

	let mut last_category = None;
	for entry in registry.palette() {
		if last_category != Some(entry.category) {
			println!("\n{}", format!("{} tasks", entry.category).bold());
			last_category = Some(entry.category);
		}

		println!(
			"  {} {:<18} {}",
			format!("{:<18}", entry.type_name).cyan(),
			entry.name,
			format!("{} -> {}", entry.input, entry.output)
				.dark_grey()
				.italic()
		);
	}

	return Ok(());
}

fn resolve_pipeline_path(config: &LathecConfig, name: &str) -> PathBuf {
	let direct = PathBuf::from(name);
	if direct.is_file() {
		return direct;
	}
	return config.paths.pipeline_dir.join(format!("{name}.toml"));
}

fn cmd_run(config: &LathecConfig, name: &str, timeout: Option<u64>) -> Result<()> {
	let registry = task_registry()?;
	let ctx = ScanContext::new(&config.paths.settings_dir);

	let path = resolve_pipeline_path(config, name);
	let mut spec = PipelineSpec::from_file(&path)
		.with_context(|| format!("could not read pipeline `{}`", path.display()))?;

	// Tasks the definition leaves unconfigured fall back to whatever
	// the settings directory has stored for their type.
	for task in &mut spec.tasks {
		if task.settings.is_none() {
			task.settings = ctx.settings.load_or_default(&task.task_type);
		}
	}

	let pipeline = spec
		.build(&registry)
		.with_context(|| format!("could not build pipeline `{}`", spec.pipeline.name))?;
	debug!(
		message = "Built pipeline",
		pipeline = %spec.pipeline.name,
		n_tasks = pipeline.len()
	);

	println!(
		"{} {} {}",
		"Running".green(),
		spec.pipeline.name,
		format!("({} tasks)", pipeline.len()).dark_grey()
	);

	let bar_style = ProgressStyle::with_template(&format!(
		"{} {} {} {}",
		"{prefix:>24}",
		"{bar:30}".dark_grey(),
		"{percent:>3}%",
		"{msg}"
	))
	.unwrap()
	.progress_chars("⣿⣷⣶⣦⣤⣄⣀");

	let multi_bar = MultiProgress::new();
	let mut bars = Vec::new();
	for task in pipeline.tasks() {
		let bar = multi_bar.add(
			ProgressBar::new(100)
				.with_style(bar_style.clone())
				.with_prefix(task.name().to_string()),
		);
		bars.push(bar);
	}

	let n_tasks = pipeline.len();
	let handle = spawn_job(pipeline, ScanData::Empty, Arc::new(ctx));

	if let Some(secs) = timeout {
		let flag = handle.cancel_flag();
		std::thread::spawn(move || {
			std::thread::sleep(Duration::from_secs(secs));
			flag.cancel();
		});
	}

	for event in handle.events().iter() {
		let bar = &bars[event.task];
		match event.kind {
			JobEventKind::TaskStarted => bar.set_position(0),
			JobEventKind::Percent(percent) => bar.set_position(u64::from(percent)),
			JobEventKind::TaskFinished => {
				bar.set_position(100);
				bar.finish_with_message(format!("{}", "done".dark_green()));
			}
			JobEventKind::TaskFailed(error) => {
				bar.abandon_with_message(format!("{}", error.red()));
			}
		}
	}

	let (_pipeline, report) = handle.wait();

	if let Some((index, state)) = report.first_failure() {
		println!(
			"\n{} task {} of {n_tasks}: {}",
			"Pipeline failed at".red(),
			index + 1,
			state.error.as_deref().unwrap_or("unknown error")
		);
		std::process::exit(1);
	}

	let output = report.output.as_ref();
	if let Some(lines) = output.and_then(|data| data.as_lines()) {
		println!(
			"\n{} {} points in {} scan lines",
			"Done:".green().bold(),
			total_points(lines),
			lines.len()
		);
		if let Some((min, max)) = bounds(lines.iter().flat_map(|l| l.points())) {
			println!("  {}", format!("bounds {min} to {max}").dark_grey());
		}
	} else if let Some(mesh) = output.and_then(|data| data.as_mesh()) {
		println!(
			"\n{} {} vertices, {} triangles",
			"Done:".green().bold(),
			mesh.vertex_count(),
			mesh.triangle_count()
		);
		if let Some((min, max)) = bounds(mesh.vertices()) {
			println!("  {}", format!("bounds {min} to {max}").dark_grey());
		}
	} else {
		println!("\n{}", "Done".green().bold());
	}

	return Ok(());
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::Path;

	/// Make sure the example project we generate actually builds
	#[test]
	fn example_pipeline_builds() {
		let registry = task_registry().unwrap();
		let spec = PipelineSpec::from_toml(EXAMPLE_PIPELINE).unwrap();
		let pipeline = spec.build(&registry).unwrap();
		assert_eq!(pipeline.len(), 3);
	}

	#[test]
	fn run_names_resolve_into_the_pipeline_dir() {
		let config = LathecConfig::default();
		assert_eq!(
			resolve_pipeline_path(&config, "example"),
			Path::new("pipelines/example.toml")
		);
	}

	#[test]
	fn run_paths_are_used_directly() {
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("p.toml");
		std::fs::write(&file, "").unwrap();

		let config = LathecConfig::default();
		assert_eq!(
			resolve_pipeline_path(&config, file.to_str().unwrap()),
			file
		);
	}
}
