/// The `cli` module defines the command-line surface and drives solving.
pub(crate) mod cli;
