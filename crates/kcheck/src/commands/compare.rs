use std::cmp::Ordering;
use std::io;

use anstream::println;
use kcheck_release::{Version, clean_kernel_version};
use serde::Serialize;

use crate::GlobalArgs;
use crate::commands::OutputFormat;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

type Result<T> = miette::Result<T, Error>;

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Relation {
    Less,
    Equal,
    Greater,
}

impl From<Ordering> for Relation {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Self::Less,
            Ordering::Equal => Self::Equal,
            Ordering::Greater => Self::Greater,
        }
    }
}

impl Relation {
    fn symbol(&self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::Equal => "=",
            Self::Greater => ">",
        }
    }
}

#[derive(Serialize)]
struct Comparison {
    a: Version,
    b: Version,
    ordering: Relation,
}

/// Cleans both releases and prints how they order, e.g. `4.0.3-301 < 4.0.4-301`.
pub(crate) fn compare(global_args: &GlobalArgs, a: &str, b: &str) -> Result<()> {
    let a = clean_kernel_version(a);
    let b = clean_kernel_version(b);
    let ordering = Relation::from(a.cmp(&b));

    match global_args.format {
        OutputFormat::Text => println!("{a} {} {b}", ordering.symbol()),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(io::stdout(), &Comparison { a, b, ordering })?;
            println!();
        }
    }

    Ok(())
}
