//! One module per subcommand, each exposing `execute`.

pub mod get;
pub mod list;
pub mod serve;
pub mod status;
