#[path = "property/vector_roundtrip.rs"]
mod vector_roundtrip;

#[path = "property/curvature_bounds.rs"]
mod curvature_bounds;

#[path = "property/normalization.rs"]
mod normalization;

#[path = "property/rollback_restore.rs"]
mod rollback_restore;
