//! Stateless disassembly.
//!
//! Operates directly on raw instruction bytes (not on a live [`Cpu`]): the
//! operand text shows what is encoded in memory, not an addressing mode's
//! resolved effective address.
//!
//! [`Cpu`]: crate::Cpu

use crate::addressing::AddrMode;
use crate::bus::Bus;
use crate::opcodes::decode;

/// Disassembles the instruction at `addr`.
///
/// Returns the formatted `"<MNEMONIC> <operand>"` line (spec.md §6) and the
/// address immediately following this instruction.
#[must_use]
pub fn disassemble(bus: &mut Bus, addr: u16) -> (String, u16) {
    let (line, next, _mode) = disassemble_one(bus, addr);
    (line, next)
}

fn disassemble_one(bus: &mut Bus, addr: u16) -> (String, u16, AddrMode) {
    let opcode = bus.read(addr);
    let info = decode(opcode);
    let mnemonic = info.mnemonic.as_str();

    let (operand, len) = match info.mode {
        AddrMode::Implied => (String::new(), 1),
        AddrMode::Immediate => {
            let v = bus.read(addr.wrapping_add(1));
            (format!(" #{v:02X}"), 2)
        }
        AddrMode::ZeroPage => {
            let v = bus.read(addr.wrapping_add(1));
            (format!(" ${v:02X}"), 2)
        }
        AddrMode::ZeroPageX => {
            let v = bus.read(addr.wrapping_add(1));
            (format!(" ${v:02X},X"), 2)
        }
        AddrMode::ZeroPageY => {
            let v = bus.read(addr.wrapping_add(1));
            (format!(" ${v:02X},Y"), 2)
        }
        AddrMode::Relative => {
            let v = bus.read(addr.wrapping_add(1));
            (format!(" ${v:02X}"), 2)
        }
        AddrMode::Absolute => {
            let v = bus.read_u16(addr.wrapping_add(1));
            (format!(" ${v:04X}"), 3)
        }
        AddrMode::AbsoluteX => {
            let v = bus.read_u16(addr.wrapping_add(1));
            (format!(" ${v:04X},X"), 3)
        }
        AddrMode::AbsoluteY => {
            let v = bus.read_u16(addr.wrapping_add(1));
            (format!(" ${v:04X},Y"), 3)
        }
        AddrMode::Indirect => {
            let v = bus.read_u16(addr.wrapping_add(1));
            (format!(" (${v:04X})"), 3)
        }
        AddrMode::IndirectX => {
            let v = bus.read(addr.wrapping_add(1));
            (format!(" (${v:02X},X)"), 2)
        }
        AddrMode::IndirectY => {
            let v = bus.read(addr.wrapping_add(1));
            (format!(" (${v:02X}),Y"), 2)
        }
    };

    let line = format!("{mnemonic}{operand}");
    (line, addr.wrapping_add(u16::from(len)), info.mode)
}

/// Disassembles up to `count` lines starting at `addr`.
///
/// After an Immediate-mode instruction, the byte immediately following its
/// operand is emitted as a literal `"DATA"` line (consuming one slot of
/// `count`) before decoding resumes (spec.md §6).
#[must_use]
pub fn disassemble_range(bus: &mut Bus, addr: u16, count: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(count);
    let mut cursor = addr;
    let mut pending_data = false;

    while lines.len() < count {
        if pending_data {
            lines.push("DATA".to_string());
            cursor = cursor.wrapping_add(1);
            pending_data = false;
            continue;
        }
        let (line, next, mode) = disassemble_one(bus, cursor);
        lines.push(line);
        cursor = next;
        if mode == AddrMode::Immediate {
            pending_data = true;
        }
    }

    lines
}
