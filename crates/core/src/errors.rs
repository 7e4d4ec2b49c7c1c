use thiserror::Error;

use crate::domain::product::Sku;

/// Failures while constructing the catalog store. The decision pipeline
/// itself never returns errors: a lookup miss is a silent exclusion and the
/// worst outcome of any scan is "no nudge".
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate sku in catalog: {0}")]
    DuplicateSku(Sku),
    #[error("alias `{alias}` points at unknown sku `{target}`")]
    UnknownAliasTarget { alias: Sku, target: Sku },
    #[error("alias `{0}` collides with a real sku")]
    AliasShadowsSku(Sku),
}
