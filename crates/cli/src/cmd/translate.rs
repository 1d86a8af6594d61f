use anyhow::Result;

use crossplat_lib::Platform;

use crate::output::{OutputFormat, print_json, symbols};

pub fn cmd_translate(platform: &Platform, verb: &str, args: &[String], output: OutputFormat) -> Result<()> {
  let program = platform.translate_command(verb);
  let args = platform.adjust_args(verb, args);

  if output.is_json() {
    return print_json(&serde_json::json!({ "program": program, "args": args }));
  }

  let translated = std::iter::once(program.to_string()).chain(args).collect::<Vec<_>>().join(" ");
  println!("{} {} {}", verb, symbols::ARROW, translated);
  Ok(())
}
