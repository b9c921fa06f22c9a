mod share;

pub use share::{NewShareRecord, ShareRecord};
