use counter_dapp::schema::COUNTER_CONTRACT;

use crate::{cli::SchemaArgs, error::Result};

pub fn run(args: SchemaArgs) -> Result<()> {
    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&COUNTER_CONTRACT)?);
    } else {
        println!("{}", serde_json::to_string(&COUNTER_CONTRACT)?);
    }

    Ok(())
}
