use crate::binbuf::BinBuf;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Elf64Ehdr {
    pub e_ident: [u8; 16],
    pub e_type: u16,
    pub e_machine: u16,
    pub e_version: u32,
    pub e_entry: u64,
    pub e_phoff: u64,
    pub e_shoff: u64,
    pub e_flags: u32,
    pub e_ehsize: u16,
    pub e_phentsize: u16,
    pub e_phnum: u16,
    pub e_shentsize: u16,
    pub e_shnum: u16,
    pub e_shstrndx: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Elf64Phdr {
    pub p_type: u32,
    pub p_flags: u32,
    pub p_offset: u64,
    pub p_vaddr: u64,
    pub p_paddr: u64,
    pub p_filesz: u64,
    pub p_memsz: u64,
    pub p_align: u64,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Elf64Shdr {
    pub sh_name: u32,
    pub sh_type: u32,
    pub sh_flags: u64,
    pub sh_addr: u64,
    pub sh_offset: u64,
    pub sh_size: u64,
    pub sh_link: u32,
    pub sh_info: u32,
    pub sh_addralign: u64,
    pub sh_entsize: u64,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Elf64Sym {
    pub st_name: u32,
    pub st_info: u8,
    pub st_other: u8,
    pub st_shndx: u16,
    pub st_value: u64,
    pub st_size: u64,
}

/// Section header paired with its name resolved from `.shstrtab`.
#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    pub shdr: Elf64Shdr,
}

/// Dynamic symbol paired with its name resolved from `.dynstr`.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub sym: Elf64Sym,
}

#[derive(Debug)]
pub struct Elf {
    pub binbuf: BinBuf,
    pub ehdr: Elf64Ehdr,
    pub phdrs: Vec<Elf64Phdr>,
    pub sections: Vec<Section>,
    pub symbols: Vec<Symbol>,
}

impl Elf {
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|sec| sec.name == name)
    }

    pub fn section_body(&self, name: &str) -> Option<&[u8]> {
        let shdr = &self.section(name)?.shdr;
        let start = shdr.sh_offset as usize;
        let end = start.checked_add(shdr.sh_size as usize)?;
        if end <= self.binbuf.buf.len() {
            Some(&self.binbuf.buf[start..end])
        } else {
            None
        }
    }
}
