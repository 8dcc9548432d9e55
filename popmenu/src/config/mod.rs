mod errors;
mod storage;

pub(crate) use storage::{ConfigFile, ConfigLoadStatus};
