pub mod check;
pub mod clean;
pub mod compare;
pub mod installed;
pub mod running;

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
