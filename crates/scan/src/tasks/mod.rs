//! Tasks that reshape raw scan lines

mod decimate;
mod transform;

pub use decimate::{DecimateLines, DecimateSettings};
pub use transform::{TransformPoints, TransformSettings};

use lathe_pipeline::{errors::RegistryError, registry::TaskRegistry};

use crate::{context::ScanContext, data::ScanData};

/// Register every task in this crate
pub fn register(registry: &mut TaskRegistry<ScanData, ScanContext>) -> Result<(), RegistryError> {
	registry.register(|| Box::new(DecimateLines::new()))?;
	registry.register(|| Box::new(TransformPoints::new()))?;
	return Ok(());
}
