// Stack slots for variables: allocation, reads and stores

use crate::{Codegen, SLOT_SIZE, X86Instr, X86Operand, X86Reg};
use model::{Error, Node};
use tracing::debug;

impl Codegen {
    /// Memory operand of an already-allocated variable.
    pub(crate) fn slot_of(&self, name: &str) -> Result<X86Operand, Error> {
        self.slots
            .get(name)
            .map(|offset| X86Operand::Mem(X86Reg::Rbp, -offset))
            .ok_or_else(|| Error::UndefinedVariable { name: name.to_string() })
    }

    fn slot_or_allocate(&mut self, name: &str) -> X86Operand {
        if let Ok(slot) = self.slot_of(name) {
            return slot;
        }
        self.next_offset += SLOT_SIZE;
        let offset = self.next_offset;
        debug!(name, offset, "allocate stack slot");
        self.slots.insert(name.to_string(), offset);
        X86Operand::Mem(X86Reg::Rbp, -offset)
    }

    pub(crate) fn gen_assign(&mut self, target: &str, value: &Node) -> Result<(), Error> {
        self.asm.push(X86Instr::Comment(format!("assign {}", target)));
        // The value is placed before the target exists, so `x := x + 1`
        // on a fresh `x` is an undefined read.
        let operand = self.gen_expr(value)?;
        let slot = self.slot_or_allocate(target);
        if operand.is_storable() {
            self.asm.push(X86Instr::Mov(slot, operand));
        } else {
            self.load(X86Reg::Rax, operand);
            self.asm.push(X86Instr::Mov(slot, X86Operand::Reg(X86Reg::Rax)));
        }
        Ok(())
    }
}
