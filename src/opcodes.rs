//! The 256-entry opcode decode table.
//!
//! Every opcode byte maps to a static [`OpcodeInfo`] descriptor. Undocumented
//! opcodes decode to the `Xxx` sentinel (mnemonic `XXX`, length 1, 1 cycle,
//! `Implied` addressing) rather than to an error — this core does not
//! emulate undocumented-opcode behavior (spec.md §1 Non-goals).

use crate::addressing::AddrMode;
use crate::CpuError;

/// Instruction mnemonic, tagged rather than dispatched by name (spec.md §9).
///
/// `Asl`/`AslA`, `Rol`/`RolA`, and `Ror`/`RorA` distinguish the memory and
/// accumulator forms at the table level, matching spec.md §4.3's note that
/// the source repo keeps those as separate descriptors. `Lsr` covers both
/// its memory and accumulator forms; the executor tells them apart by
/// addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Mnemonic {
    Adc, And, Asl, AslA, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny,
    Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, RolA,
    Ror, RorA, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx,
    Txa, Txs, Tya,
    /// Sentinel for any opcode with no documented instruction.
    Xxx,
}

impl Mnemonic {
    /// The three-letter (or `XXX`) text used in disassembly.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adc => "ADC", Self::And => "AND", Self::Asl | Self::AslA => "ASL",
            Self::Bcc => "BCC", Self::Bcs => "BCS", Self::Beq => "BEQ", Self::Bit => "BIT",
            Self::Bmi => "BMI", Self::Bne => "BNE", Self::Bpl => "BPL", Self::Brk => "BRK",
            Self::Bvc => "BVC", Self::Bvs => "BVS", Self::Clc => "CLC", Self::Cld => "CLD",
            Self::Cli => "CLI", Self::Clv => "CLV", Self::Cmp => "CMP", Self::Cpx => "CPX",
            Self::Cpy => "CPY", Self::Dec => "DEC", Self::Dex => "DEX", Self::Dey => "DEY",
            Self::Eor => "EOR", Self::Inc => "INC", Self::Inx => "INX", Self::Iny => "INY",
            Self::Jmp => "JMP", Self::Jsr => "JSR", Self::Lda => "LDA", Self::Ldx => "LDX",
            Self::Ldy => "LDY", Self::Lsr => "LSR", Self::Nop => "NOP", Self::Ora => "ORA",
            Self::Pha => "PHA", Self::Php => "PHP", Self::Pla => "PLA", Self::Plp => "PLP",
            Self::Rol | Self::RolA => "ROL", Self::Ror | Self::RorA => "ROR",
            Self::Rti => "RTI", Self::Rts => "RTS", Self::Sbc => "SBC", Self::Sec => "SEC",
            Self::Sed => "SED", Self::Sei => "SEI", Self::Sta => "STA", Self::Stx => "STX",
            Self::Sty => "STY", Self::Tax => "TAX", Self::Tay => "TAY", Self::Tsx => "TSX",
            Self::Txa => "TXA", Self::Txs => "TXS", Self::Tya => "TYA", Self::Xxx => "XXX",
        }
    }
}

/// A single opcode's static decode information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    /// The opcode byte this descriptor was registered under.
    pub opcode: u8,
    /// Instruction mnemonic.
    pub mnemonic: Mnemonic,
    /// Addressing mode, selecting which resolver runs.
    pub mode: AddrMode,
    /// Instruction length in bytes, including the opcode byte (1-3).
    pub len: u8,
    /// Base cycle count, before any page-crossing/branch penalty.
    pub cycles: u8,
}

const fn op(opcode: u8, mnemonic: Mnemonic, mode: AddrMode, len: u8, cycles: u8) -> OpcodeInfo {
    OpcodeInfo { opcode, mnemonic, mode, len, cycles }
}

const fn xxx(opcode: u8) -> OpcodeInfo {
    op(opcode, Mnemonic::Xxx, AddrMode::Implied, 1, 1)
}

/// Dense 256-entry decode table, indexed by opcode byte.
#[rustfmt::skip]
pub static OPCODE_TABLE: [OpcodeInfo; 256] = build_table();

const fn build_table() -> [OpcodeInfo; 256] {
    use AddrMode::{
        Absolute as Abs, AbsoluteX as Abx, AbsoluteY as Aby, Immediate as Imm, Implied as Imp,
        Indirect as Ind, IndirectX as Idx, IndirectY as Idy, Relative as Rel, ZeroPage as Zp0,
        ZeroPageX as Zpx, ZeroPageY as Zpy,
    };
    use Mnemonic::*;

    let mut t = [xxx(0); 256];
    let mut i = 0;
    while i < 256 {
        t[i] = xxx(i as u8);
        i += 1;
    }

    t[0x00] = op(0x00, Brk, Imp, 1, 7);
    t[0x01] = op(0x01, Ora, Idx, 2, 6);
    t[0x05] = op(0x05, Ora, Zp0, 2, 3);
    t[0x06] = op(0x06, Asl, Zp0, 2, 5);
    t[0x08] = op(0x08, Php, Imp, 1, 3);
    t[0x09] = op(0x09, Ora, Imm, 2, 2);
    t[0x0A] = op(0x0A, AslA, Imp, 1, 2);
    t[0x0D] = op(0x0D, Ora, Abs, 3, 4);
    t[0x0E] = op(0x0E, Asl, Abs, 3, 6);

    t[0x10] = op(0x10, Bpl, Rel, 2, 2);
    t[0x11] = op(0x11, Ora, Idy, 2, 5);
    t[0x15] = op(0x15, Ora, Zpx, 2, 4);
    t[0x16] = op(0x16, Asl, Zpx, 2, 6);
    t[0x18] = op(0x18, Clc, Imp, 1, 2);
    t[0x19] = op(0x19, Ora, Aby, 3, 4);
    t[0x1D] = op(0x1D, Ora, Abx, 3, 4);
    t[0x1E] = op(0x1E, Asl, Abx, 3, 7);

    t[0x20] = op(0x20, Jsr, Abs, 3, 6);
    t[0x21] = op(0x21, And, Idx, 2, 6);
    t[0x24] = op(0x24, Bit, Zp0, 2, 3);
    t[0x25] = op(0x25, And, Zp0, 2, 3);
    t[0x26] = op(0x26, Rol, Zp0, 2, 5);
    t[0x28] = op(0x28, Plp, Imp, 1, 4);
    t[0x29] = op(0x29, And, Imm, 2, 2);
    t[0x2A] = op(0x2A, RolA, Imp, 1, 2);
    t[0x2C] = op(0x2C, Bit, Abs, 3, 4);
    t[0x2D] = op(0x2D, And, Abs, 3, 4);
    t[0x2E] = op(0x2E, Rol, Abs, 3, 6);

    t[0x30] = op(0x30, Bmi, Rel, 2, 2);
    t[0x31] = op(0x31, And, Idy, 2, 5);
    t[0x35] = op(0x35, And, Zpx, 2, 4);
    t[0x36] = op(0x36, Rol, Zpx, 2, 6);
    t[0x38] = op(0x38, Sec, Imp, 1, 2);
    t[0x39] = op(0x39, And, Aby, 3, 4);
    t[0x3D] = op(0x3D, And, Abx, 3, 4);
    t[0x3E] = op(0x3E, Rol, Abx, 3, 7);

    t[0x40] = op(0x40, Rti, Imp, 1, 6);
    t[0x41] = op(0x41, Eor, Idx, 2, 6);
    t[0x45] = op(0x45, Eor, Zp0, 2, 3);
    t[0x46] = op(0x46, Lsr, Zp0, 2, 5);
    t[0x48] = op(0x48, Pha, Imp, 1, 3);
    t[0x49] = op(0x49, Eor, Imm, 2, 2);
    t[0x4A] = op(0x4A, Lsr, Imp, 1, 2);
    t[0x4C] = op(0x4C, Jmp, Abs, 3, 3);
    t[0x4D] = op(0x4D, Eor, Abs, 3, 4);
    t[0x4E] = op(0x4E, Lsr, Abs, 3, 6);

    t[0x50] = op(0x50, Bvc, Rel, 2, 2);
    t[0x51] = op(0x51, Eor, Idy, 2, 5);
    t[0x55] = op(0x55, Eor, Zpx, 2, 4);
    t[0x56] = op(0x56, Lsr, Zpx, 2, 6);
    t[0x58] = op(0x58, Cli, Imp, 1, 2);
    t[0x59] = op(0x59, Eor, Aby, 3, 4);
    t[0x5D] = op(0x5D, Eor, Abx, 3, 4);
    t[0x5E] = op(0x5E, Lsr, Abx, 3, 7);

    t[0x60] = op(0x60, Rts, Imp, 1, 6);
    t[0x61] = op(0x61, Adc, Idx, 2, 6);
    t[0x65] = op(0x65, Adc, Zp0, 2, 3);
    t[0x66] = op(0x66, Ror, Zp0, 2, 5);
    t[0x68] = op(0x68, Pla, Imp, 1, 4);
    t[0x69] = op(0x69, Adc, Imm, 2, 2);
    t[0x6A] = op(0x6A, RorA, Imp, 1, 2);
    t[0x6C] = op(0x6C, Jmp, Ind, 3, 5);
    t[0x6D] = op(0x6D, Adc, Abs, 3, 4);
    t[0x6E] = op(0x6E, Ror, Abs, 3, 6);

    t[0x70] = op(0x70, Bvs, Rel, 2, 2);
    t[0x71] = op(0x71, Adc, Idy, 2, 5);
    t[0x75] = op(0x75, Adc, Zpx, 2, 4);
    t[0x76] = op(0x76, Ror, Zpx, 2, 6);
    t[0x78] = op(0x78, Sei, Imp, 1, 2);
    t[0x79] = op(0x79, Adc, Aby, 3, 4);
    t[0x7D] = op(0x7D, Adc, Abx, 3, 4);
    t[0x7E] = op(0x7E, Ror, Abx, 3, 7);

    t[0x81] = op(0x81, Sta, Idx, 2, 6);
    t[0x84] = op(0x84, Sty, Zp0, 2, 3);
    t[0x85] = op(0x85, Sta, Zp0, 2, 3);
    t[0x86] = op(0x86, Stx, Zp0, 2, 3);
    t[0x88] = op(0x88, Dey, Imp, 1, 2);
    t[0x8A] = op(0x8A, Txa, Imp, 1, 2);
    t[0x8C] = op(0x8C, Sty, Abs, 3, 4);
    t[0x8D] = op(0x8D, Sta, Abs, 3, 4);
    t[0x8E] = op(0x8E, Stx, Abs, 3, 4);

    t[0x90] = op(0x90, Bcc, Rel, 2, 2);
    t[0x91] = op(0x91, Sta, Idy, 2, 6);
    t[0x94] = op(0x94, Sty, Zpx, 2, 4);
    t[0x95] = op(0x95, Sta, Zpx, 2, 4);
    t[0x96] = op(0x96, Stx, Zpy, 2, 4);
    t[0x98] = op(0x98, Tya, Imp, 1, 2);
    t[0x99] = op(0x99, Sta, Aby, 3, 5);
    t[0x9A] = op(0x9A, Txs, Imp, 1, 2);
    t[0x9D] = op(0x9D, Sta, Abx, 3, 5);

    t[0xA0] = op(0xA0, Ldy, Imm, 2, 2);
    t[0xA1] = op(0xA1, Lda, Idx, 2, 6);
    t[0xA2] = op(0xA2, Ldx, Imm, 2, 2);
    t[0xA4] = op(0xA4, Ldy, Zp0, 2, 3);
    t[0xA5] = op(0xA5, Lda, Zp0, 2, 3);
    t[0xA6] = op(0xA6, Ldx, Zp0, 2, 3);
    t[0xA8] = op(0xA8, Tay, Imp, 1, 2);
    t[0xA9] = op(0xA9, Lda, Imm, 2, 2);
    t[0xAA] = op(0xAA, Tax, Imp, 1, 2);
    t[0xAC] = op(0xAC, Ldy, Abs, 3, 4);
    t[0xAD] = op(0xAD, Lda, Abs, 3, 4);
    t[0xAE] = op(0xAE, Ldx, Abs, 3, 4);

    t[0xB0] = op(0xB0, Bcs, Rel, 2, 2);
    t[0xB1] = op(0xB1, Lda, Idy, 2, 5);
    t[0xB4] = op(0xB4, Ldy, Zpx, 2, 4);
    t[0xB5] = op(0xB5, Lda, Zpx, 2, 4);
    t[0xB6] = op(0xB6, Ldx, Zpy, 2, 4);
    t[0xB8] = op(0xB8, Clv, Imp, 1, 2);
    t[0xB9] = op(0xB9, Lda, Aby, 3, 4);
    t[0xBA] = op(0xBA, Tsx, Imp, 1, 2);
    t[0xBC] = op(0xBC, Ldy, Abx, 3, 4);
    t[0xBD] = op(0xBD, Lda, Abx, 3, 4);
    t[0xBE] = op(0xBE, Ldx, Aby, 3, 4);

    t[0xC0] = op(0xC0, Cpy, Imm, 2, 2);
    t[0xC1] = op(0xC1, Cmp, Idx, 2, 6);
    t[0xC4] = op(0xC4, Cpy, Zp0, 2, 3);
    t[0xC5] = op(0xC5, Cmp, Zp0, 2, 3);
    t[0xC6] = op(0xC6, Dec, Zp0, 2, 5);
    t[0xC8] = op(0xC8, Iny, Imp, 1, 2);
    t[0xC9] = op(0xC9, Cmp, Imm, 2, 2);
    t[0xCA] = op(0xCA, Dex, Imp, 1, 2);
    t[0xCC] = op(0xCC, Cpy, Abs, 3, 4);
    t[0xCD] = op(0xCD, Cmp, Abs, 3, 4);
    t[0xCE] = op(0xCE, Dec, Abs, 3, 6);

    t[0xD0] = op(0xD0, Bne, Rel, 2, 2);
    t[0xD1] = op(0xD1, Cmp, Idy, 2, 5);
    t[0xD5] = op(0xD5, Cmp, Zpx, 2, 4);
    t[0xD6] = op(0xD6, Dec, Zpx, 2, 6);
    t[0xD8] = op(0xD8, Cld, Imp, 1, 2);
    t[0xD9] = op(0xD9, Cmp, Aby, 3, 4);
    t[0xDD] = op(0xDD, Cmp, Abx, 3, 4);
    t[0xDE] = op(0xDE, Dec, Abx, 3, 7);

    t[0xE0] = op(0xE0, Cpx, Imm, 2, 2);
    t[0xE1] = op(0xE1, Sbc, Idx, 2, 6);
    t[0xE4] = op(0xE4, Cpx, Zp0, 2, 3);
    t[0xE5] = op(0xE5, Sbc, Zp0, 2, 3);
    t[0xE6] = op(0xE6, Inc, Zp0, 2, 5);
    t[0xE8] = op(0xE8, Inx, Imp, 1, 2);
    t[0xE9] = op(0xE9, Sbc, Imm, 2, 2);
    t[0xEA] = op(0xEA, Nop, Imp, 1, 2);
    t[0xEC] = op(0xEC, Cpx, Abs, 3, 4);
    t[0xED] = op(0xED, Sbc, Abs, 3, 4);
    t[0xEE] = op(0xEE, Inc, Abs, 3, 6);

    t[0xF0] = op(0xF0, Beq, Rel, 2, 2);
    t[0xF1] = op(0xF1, Sbc, Idy, 2, 5);
    t[0xF5] = op(0xF5, Sbc, Zpx, 2, 4);
    t[0xF6] = op(0xF6, Inc, Zpx, 2, 6);
    t[0xF8] = op(0xF8, Sed, Imp, 1, 2);
    t[0xF9] = op(0xF9, Sbc, Aby, 3, 4);
    t[0xFD] = op(0xFD, Sbc, Abx, 3, 4);
    t[0xFE] = op(0xFE, Inc, Abx, 3, 7);

    t
}

/// Decodes an opcode byte to its static descriptor.
///
/// Infallible: an undocumented opcode decodes to the `Xxx` sentinel rather
/// than an error (spec.md §4.3, §7).
#[must_use]
pub fn decode(opcode: u8) -> &'static OpcodeInfo {
    &OPCODE_TABLE[opcode as usize]
}

/// Decodes an opcode byte, rejecting undocumented opcodes.
///
/// For host tooling (assemblers, linters) that want a hard error instead of
/// the `Xxx` sentinel `tick()` silently falls back to.
pub fn decode_strict(opcode: u8) -> Result<&'static OpcodeInfo, CpuError> {
    let info = decode(opcode);
    if info.mnemonic == Mnemonic::Xxx {
        Err(CpuError::UnknownOpcode(opcode))
    } else {
        Ok(info)
    }
}
