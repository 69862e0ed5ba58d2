use anyhow::{bail, Context as _, Result};
use std::mem::size_of;
use std::path::Path;

use crate::binbuf::BinBuf;
use crate::elf::{Elf, Elf64Ehdr, Elf64Phdr, Elf64Shdr, Elf64Sym, Section, Symbol};

/// Reads a `#[repr(C)]` struct out of `data` at `offset`, by value so that
/// unaligned offsets are fine. `None` when the buffer is too short.
pub fn read_struct<T: Copy>(data: &[u8], offset: usize) -> Option<T> {
    let end = offset.checked_add(size_of::<T>())?;
    if end > data.len() {
        return None;
    }
    unsafe { Some(data[offset..end].as_ptr().cast::<T>().read_unaligned()) }
}

/// Null-terminated string at `offset` in a string table section body. Names
/// that are out of range or not UTF-8 render as placeholders rather than
/// failing the whole parse.
fn table_str(table: &[u8], offset: u32) -> &str {
    let start = offset as usize;
    if start >= table.len() {
        return "";
    }
    let end = table[start..]
        .iter()
        .position(|&c| c == 0)
        .map(|pos| start + pos)
        .unwrap_or(table.len());
    std::str::from_utf8(&table[start..end]).unwrap_or("<invalid>")
}

fn slice_at(data: &[u8], start: usize, len: usize) -> Option<&[u8]> {
    let end = start.checked_add(len)?;
    if end <= data.len() {
        Some(&data[start..end])
    } else {
        None
    }
}

pub fn parse_elf<P: AsRef<Path>>(path: P) -> Result<Elf> {
    parse_image(BinBuf::open(path)?)
}

pub fn parse_image(binbuf: BinBuf) -> Result<Elf> {
    let data = &binbuf.buf;

    let ehdr: Elf64Ehdr = read_struct(data, 0).context("file too small for ELF header")?;
    if &ehdr.e_ident[0..4] != b"\x7fELF" {
        bail!("not an ELF file");
    }

    let mut phdrs = Vec::with_capacity(ehdr.e_phnum as usize);
    for i in 0..ehdr.e_phnum as usize {
        let offset = ehdr.e_phoff as usize + i * ehdr.e_phentsize as usize;
        let phdr: Elf64Phdr =
            read_struct(data, offset).context("failed to read program header")?;
        phdrs.push(phdr);
    }

    let mut shdrs = Vec::with_capacity(ehdr.e_shnum as usize);
    for i in 0..ehdr.e_shnum as usize {
        let offset = ehdr.e_shoff as usize + i * ehdr.e_shentsize as usize;
        let shdr: Elf64Shdr =
            read_struct(data, offset).context("failed to read section header")?;
        shdrs.push(shdr);
    }

    let name_table = if shdrs.is_empty() {
        Vec::new()
    } else {
        let strtab = shdrs
            .get(ehdr.e_shstrndx as usize)
            .and_then(|sh| slice_at(data, sh.sh_offset as usize, sh.sh_size as usize))
            .context("invalid section name table")?;
        strtab.to_vec()
    };

    let sections: Vec<Section> = shdrs
        .into_iter()
        .map(|shdr| Section {
            name: table_str(&name_table, shdr.sh_name).to_string(),
            shdr,
        })
        .collect();

    let mut elf = Elf {
        binbuf,
        ehdr,
        phdrs,
        sections,
        symbols: Vec::new(),
    };
    elf.symbols = parse_dynsym(&elf);
    Ok(elf)
}

/// `.dynsym` entries with names resolved through `.dynstr`. A file without
/// a dynamic symbol table (stripped static binaries) just has no symbols.
fn parse_dynsym(elf: &Elf) -> Vec<Symbol> {
    let (Some(dynsym), Some(dynstr)) = (elf.section_body(".dynsym"), elf.section_body(".dynstr"))
    else {
        return Vec::new();
    };

    let count = dynsym.len() / size_of::<Elf64Sym>();
    let mut symbols = Vec::with_capacity(count);
    for i in 0..count {
        let Some(sym) = read_struct::<Elf64Sym>(dynsym, i * size_of::<Elf64Sym>()) else {
            break;
        };
        symbols.push(Symbol {
            name: table_str(dynstr, sym.st_name).to_string(),
            sym,
        });
    }
    symbols
}
