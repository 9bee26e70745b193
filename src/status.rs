//! CPU status register (`P`) flags.
//!
//! The 6502 status register is an 8-bit packed bitfield:
//!
//! ```text
//! 7  6  5  4  3  2  1  0
//! N  V  U  B  D  I  Z  C
//! │  │  │  │  │  │  │  └─ Carry
//! │  │  │  │  │  │  └──── Zero
//! │  │  │  │  │  └─────── Interrupt Disable
//! │  │  │  │  └────────── Decimal Mode (NMOS/CMOS only; inert on NES)
//! │  │  │  └───────────── Break (1 when pushed by PHP/BRK, 0 from IRQ/NMI)
//! │  │  └──────────────── Unused (always 1 in any observable image of P)
//! │  └─────────────────── Overflow
//! └────────────────────── Negative
//! ```

use bitflags::bitflags;

bitflags! {
    /// CPU status register flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Status: u8 {
        /// Carry — set on unsigned overflow out of bit 7, or lack of borrow on subtraction.
        const CARRY = 1 << 0;
        /// Zero — set when the last result was zero.
        const ZERO = 1 << 1;
        /// Interrupt Disable — when set, IRQ is ignored. NMI is unaffected.
        const INTERRUPT_DISABLE = 1 << 2;
        /// Decimal Mode — enables BCD correction in ADC/SBC (NMOS, CMOS). Inert on NES.
        const DECIMAL = 1 << 3;
        /// Break — distinguishes a BRK/PHP push (1) from an IRQ/NMI push (0).
        const BREAK = 1 << 4;
        /// Unused — always 1 whenever P is observed at an instruction boundary.
        const UNUSED = 1 << 5;
        /// Overflow — set on signed overflow.
        const OVERFLOW = 1 << 6;
        /// Negative — set from bit 7 of the result.
        const NEGATIVE = 1 << 7;
    }
}

impl Status {
    /// Status immediately after RESET: Unused and InterruptDisable set, everything else clear.
    pub const POWER_ON: Self = Self::UNUSED.union(Self::INTERRUPT_DISABLE);

    /// Mask of flags PLP/RTI install from a stack byte (B and U are never taken from the stack).
    pub const PULL_MASK: Self = Self::CARRY
        .union(Self::ZERO)
        .union(Self::INTERRUPT_DISABLE)
        .union(Self::DECIMAL)
        .union(Self::OVERFLOW)
        .union(Self::NEGATIVE);

    /// Sets or clears a single flag.
    #[inline]
    pub fn set_flag(&mut self, flag: Self, value: bool) {
        self.set(flag, value);
    }

    /// Returns whether a single flag is set.
    #[inline]
    #[must_use]
    pub fn get_flag(self, flag: Self) -> bool {
        self.contains(flag)
    }

    /// Sets Zero and Negative together from a result byte.
    #[inline]
    pub fn set_zn(&mut self, value: u8) {
        self.set_flag(Self::ZERO, value == 0);
        self.set_flag(Self::NEGATIVE, value & 0x80 != 0);
    }

    /// Packs this register into the byte pushed to the stack (PHP, BRK, IRQ, NMI).
    ///
    /// Unused is always forced to 1; Break is 1 for PHP/BRK and 0 for IRQ/NMI.
    #[inline]
    #[must_use]
    pub const fn to_stack_byte(self, brk: bool) -> u8 {
        let mut value = self.bits() | Self::UNUSED.bits();
        if brk {
            value |= Self::BREAK.bits();
        } else {
            value &= !Self::BREAK.bits();
        }
        value
    }

    /// Unpacks a byte pulled from the stack (PLP, RTI).
    ///
    /// Break is dropped and Unused is forced to 1, matching real hardware: the B
    /// flag only ever exists in the stack image, never in the live register.
    #[inline]
    #[must_use]
    pub fn from_stack_byte(value: u8) -> Self {
        Self::from_bits_truncate((value & !Self::BREAK.bits()) | Self::UNUSED.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_on_has_interrupt_disable_and_unused() {
        let status = Status::POWER_ON;
        assert!(status.get_flag(Status::INTERRUPT_DISABLE));
        assert!(status.get_flag(Status::UNUSED));
        assert!(!status.get_flag(Status::CARRY));
    }

    #[test]
    fn set_zn_zero() {
        let mut status = Status::empty();
        status.set_zn(0);
        assert!(status.get_flag(Status::ZERO));
        assert!(!status.get_flag(Status::NEGATIVE));
    }

    #[test]
    fn set_zn_negative() {
        let mut status = Status::empty();
        status.set_zn(0x80);
        assert!(!status.get_flag(Status::ZERO));
        assert!(status.get_flag(Status::NEGATIVE));
    }

    #[test]
    fn to_stack_byte_sets_break_only_for_brk() {
        let status = Status::CARRY | Status::ZERO;
        let pushed_brk = status.to_stack_byte(true);
        let pushed_irq = status.to_stack_byte(false);
        assert_eq!(pushed_brk & Status::BREAK.bits(), Status::BREAK.bits());
        assert_eq!(pushed_irq & Status::BREAK.bits(), 0);
        assert_eq!(pushed_brk & Status::UNUSED.bits(), Status::UNUSED.bits());
        assert_eq!(pushed_irq & Status::UNUSED.bits(), Status::UNUSED.bits());
    }

    #[test]
    fn from_stack_byte_normalizes_break_and_unused() {
        let status = Status::from_stack_byte(0xFF);
        assert!(!status.get_flag(Status::BREAK));
        assert!(status.get_flag(Status::UNUSED));
        assert!(status.get_flag(Status::CARRY));
    }

    #[test]
    fn from_stack_byte_forces_unused_even_if_clear() {
        let status = Status::from_stack_byte(0x00);
        assert!(status.get_flag(Status::UNUSED));
        assert!(!status.get_flag(Status::CARRY));
    }
}
