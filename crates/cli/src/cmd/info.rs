use anyhow::Result;

use nodebuild_lib::platform::Platform;

use crate::output::{OutputFormat, field, print_json};

pub fn cmd_info(format: OutputFormat) -> Result<()> {
  let host = Platform::current();

  if format.is_json() {
    return print_json(&serde_json::json!({
      "os": host.os.as_str(),
      "cpu": host.arch.as_str(),
      "platform": host.pair(),
    }));
  }

  println!("System:");
  field("Platform", &host.pair());
  field("OS", host.os.as_str());
  field("CPU", host.arch.as_str());
  Ok(())
}
