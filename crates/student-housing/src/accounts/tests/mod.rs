mod common;
mod routing;

pub(crate) use common::*;
