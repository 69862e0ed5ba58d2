use crate::elf::Elf;

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy)]
enum SegmentType {
    PT_NULL,
    PT_LOAD,
    PT_DYNAMIC,
    PT_INTERP,
    PT_NOTE,
    PT_SHLIB,
    PT_PHDR,
    PT_TLS,
    PT_GNU_EH_FRAME,
    PT_GNU_STACK,
    PT_GNU_RELRO,
    PT_UNKNOWN,
}

impl From<u32> for SegmentType {
    fn from(p_type: u32) -> Self {
        match p_type {
            0 => SegmentType::PT_NULL,
            1 => SegmentType::PT_LOAD,
            2 => SegmentType::PT_DYNAMIC,
            3 => SegmentType::PT_INTERP,
            4 => SegmentType::PT_NOTE,
            5 => SegmentType::PT_SHLIB,
            6 => SegmentType::PT_PHDR,
            7 => SegmentType::PT_TLS,
            0x6474e550 => SegmentType::PT_GNU_EH_FRAME,
            0x6474e551 => SegmentType::PT_GNU_STACK,
            0x6474e552 => SegmentType::PT_GNU_RELRO,
            _ => SegmentType::PT_UNKNOWN,
        }
    }
}

pub fn segment_type_name(p_type: u32) -> &'static str {
    match SegmentType::from(p_type) {
        SegmentType::PT_NULL => "NULL",
        SegmentType::PT_LOAD => "LOAD",
        SegmentType::PT_DYNAMIC => "DYNAMIC",
        SegmentType::PT_INTERP => "INTERP",
        SegmentType::PT_NOTE => "NOTE",
        SegmentType::PT_SHLIB => "SHLIB",
        SegmentType::PT_PHDR => "PHDR",
        SegmentType::PT_TLS => "TLS",
        SegmentType::PT_GNU_EH_FRAME => "GNU_EH_FRAME",
        SegmentType::PT_GNU_STACK => "GNU_STACK",
        SegmentType::PT_GNU_RELRO => "GNU_RELRO",
        SegmentType::PT_UNKNOWN => "UNKNOWN",
    }
}

pub fn show_header(elf: &Elf) {
    for b in elf.ehdr.e_ident {
        print!("{b:02x} ");
    }
    println!();
    let ehdr = &elf.ehdr;
    println!("e_type      0x{:x}", ehdr.e_type);
    println!("e_machine   0x{:x}", ehdr.e_machine);
    println!("e_version   0x{:x}", ehdr.e_version);
    println!("e_entry     0x{:x}", ehdr.e_entry);
    println!("e_phoff     0x{:x}", ehdr.e_phoff);
    println!("e_shoff     0x{:x}", ehdr.e_shoff);
    println!("e_flags     0x{:x}", ehdr.e_flags);
    println!("e_ehsize    0x{:x}", ehdr.e_ehsize);
    println!("e_phentsize 0x{:x}", ehdr.e_phentsize);
    println!("e_phnum     0x{:x}", ehdr.e_phnum);
    println!("e_shentsize 0x{:x}", ehdr.e_shentsize);
    println!("e_shnum     0x{:x}", ehdr.e_shnum);
    println!("e_shstrndx  0x{:x}", ehdr.e_shstrndx);
}

pub fn show_sections(elf: &Elf) {
    println!(
        "{:>4} {:<20} {:>18} {:>18} {:>18}",
        "Nr", "Name", "Addr", "Offset", "Size"
    );
    for (i, sec) in elf.sections.iter().enumerate() {
        println!(
            "[{:>2}] {:<20} {:018x} {:018x} {:018x}",
            i, sec.name, sec.shdr.sh_addr, sec.shdr.sh_offset, sec.shdr.sh_size
        );
    }
}

pub fn show_segments(elf: &Elf) {
    println!(
        "{:>4} {:<14} {:>18} {:>18} {:>18} {:>18}",
        "Nr", "Type", "Offset", "VirtAddr", "FileSiz", "MemSiz"
    );
    for (i, phdr) in elf.phdrs.iter().enumerate() {
        println!(
            "[{:>2}] {:<14} {:018x} {:018x} {:018x} {:018x}",
            i,
            segment_type_name(phdr.p_type),
            phdr.p_offset,
            phdr.p_vaddr,
            phdr.p_filesz,
            phdr.p_memsz
        );
    }
}

/// File-offset map: each segment's span, with the sections whose payload
/// falls inside it listed underneath.
pub fn show_layout(elf: &Elf) {
    for phdr in &elf.phdrs {
        let seg_start = phdr.p_offset;
        // headers are untrusted; saturate rather than wrap on bogus spans
        let seg_end = phdr.p_offset.saturating_add(phdr.p_filesz);

        println!("{:<20} 0x{:x}", segment_type_name(phdr.p_type), seg_start);
        for sec in &elf.sections {
            let sec_start = sec.shdr.sh_offset;
            let sec_end = sec.shdr.sh_offset.saturating_add(sec.shdr.sh_size);
            if sec_start >= seg_start && sec_end <= seg_end && sec.shdr.sh_size > 0 {
                println!("\t{:<20} 0x{:x}-0x{:x}", sec.name, sec_start, sec_end);
            }
        }
        println!("{:<20} 0x{:x}", "END", seg_end);
        println!("-----------------------------------------------");
    }
}

pub fn show_symbols(elf: &Elf) {
    println!("{:>4} {:>18} {:>10} {}", "Nr", "Value", "Size", "Name");
    for (i, symbol) in elf.symbols.iter().enumerate() {
        println!(
            "[{:>2}] {:018x} {:>10} {}",
            i, symbol.sym.st_value, symbol.sym.st_size, symbol.name
        );
    }
}
