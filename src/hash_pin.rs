//! Prints the Argon2 hash to put in `MAINTENANCE_PIN_HASH`.
//!
//! Usage: `hash-pin <pin>`

use bakeshop_api::middleware::maintenance::hash_pin;
use color_eyre::eyre::{Result, bail};

fn main() -> Result<()> {
    color_eyre::install()?;

    let Some(pin) = std::env::args().nth(1) else {
        bail!("usage: hash-pin <pin>");
    };
    let pin = pin.trim();
    if pin.is_empty() {
        bail!("the PIN must not be empty");
    }

    println!("{}", hash_pin(pin)?);
    Ok(())
}
