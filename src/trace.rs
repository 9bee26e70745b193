//! Per-instruction trace line formatting.
//!
//! A single line per fetched instruction: address, raw bytes, disassembly,
//! and a register/flag snapshot — the same shape as the nestest-log-style
//! tracer this is grounded in, minus the NES-specific unofficial-opcode
//! marker (this core has no undocumented-opcode behavior to flag).

use crate::bus::Bus;
use crate::cpu::Cpu;
use crate::disasm::disassemble;
use crate::opcodes::decode;

/// Renders one trace line for the instruction about to execute at `cpu.pc`.
///
/// Call this before [`Cpu::tick`] fetches the next instruction; it does not
/// advance the CPU itself.
#[must_use]
pub fn trace_line(cpu: &Cpu, bus: &mut Bus) -> String {
    let opcode = bus.read(cpu.pc);
    let info = decode(opcode);

    let mut bytes = String::new();
    for i in 0..info.len {
        let b = bus.read(cpu.pc.wrapping_add(u16::from(i)));
        bytes.push_str(&format!("{b:02X} "));
    }

    let (disasm_text, _) = disassemble(bus, cpu.pc);

    format!(
        "{pc:04X}  {bytes:<9}{disasm_text:<32}A:{a:02X} X:{x:02X} Y:{y:02X} P:{p:02X} SP:{sp:02X} CYC:{cyc}",
        pc = cpu.pc,
        a = cpu.a,
        x = cpu.x,
        y = cpu.y,
        p = cpu.status.bits(),
        sp = cpu.sp,
        cyc = cpu.cycles_remaining,
    )
}
