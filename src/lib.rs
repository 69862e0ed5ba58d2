pub mod binbuf;
pub mod elf;
pub mod elf_parser;
pub mod show;
