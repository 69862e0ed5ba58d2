use std::env;

use anyhow::{bail, Context as _, Result};

use binstr::binbuf::BinBuf;
use binstr::elf_parser;
use binstr::show;

fn usage(prog: &str) {
    println!("Usage: {prog} <filename> <offset>");
    println!("       {prog} <filename> --header|--sections|--segments|--layout|--symbols");
}

/// Base-16 offset; `0x`/`0X` prefix and uppercase digits accepted.
fn parse_offset(arg: &str) -> Result<usize> {
    let digits = arg
        .strip_prefix("0x")
        .or_else(|| arg.strip_prefix("0X"))
        .unwrap_or(arg);
    usize::from_str_radix(digits, 16).with_context(|| format!("invalid hex offset: {arg}"))
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        usage(args.first().map(String::as_str).unwrap_or("binstr"));
        return Ok(());
    }
    let filename = &args[1];

    if args[2].starts_with("--") {
        let elf = elf_parser::parse_elf(filename)?;
        for flag in &args[2..] {
            match flag.as_str() {
                "--header" => show::show_header(&elf),
                "--sections" => show::show_sections(&elf),
                "--segments" => show::show_segments(&elf),
                "--layout" => show::show_layout(&elf),
                "--symbols" => show::show_symbols(&elf),
                other => bail!("unknown view: {other}"),
            }
        }
        return Ok(());
    }

    let offset = parse_offset(&args[2])?;
    let binbuf = BinBuf::open(filename)?;
    println!("{}", binbuf.str_at(offset)?);
    Ok(())
}
