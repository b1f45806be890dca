mod rsa;

pub use crate::rsa::*;
pub use crate::rsa::config::SILENT;

use std::error::Error;
use clap::Parser;

fn main() -> Result<(), Box<dyn Error>> {
    let rsa = RSA::parse();
    if !SILENT.is_set().unwrap_or(false) { SILENT.set(rsa.silent)?; }
    if !rsa.silent { eprintln!("Run args: {:?}", rsa); }
    rsa.run()?;
    Ok(())
}
