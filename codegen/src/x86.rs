// X86-64 register and instruction definitions, printed in NASM syntax
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum X86Reg {
    Rax, Rbx, Rdi, Rbp, Rsp,
    Al, // low byte of rax, target of setcc
}

impl X86Reg {
    pub fn to_str(&self) -> &str {
        match self {
            Self::Rax => "rax", Self::Rbx => "rbx", Self::Rdi => "rdi",
            Self::Rbp => "rbp", Self::Rsp => "rsp",
            Self::Al => "al",
        }
    }
}

/// Where a value is placed: register, stack slot or immediate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum X86Operand {
    Reg(X86Reg),
    Mem(X86Reg, i32), // [reg + offset] - QWORD
    Imm(i64),
    Label(String), // symbolic constant, e.g. SYS_EXIT
}

impl X86Operand {
    /// Whether the operand can be the source of a store to memory without a
    /// scratch register: x86 has no memory-to-memory move and only sign-extended
    /// 32-bit immediates.
    pub fn is_storable(&self) -> bool {
        match self {
            Self::Reg(_) | Self::Label(_) => true,
            Self::Mem(..) => false,
            Self::Imm(i) => i32::try_from(*i).is_ok(),
        }
    }
}

impl fmt::Display for X86Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reg(r) => f.write_str(r.to_str()),
            Self::Mem(r, offset) => write!(f, "QWORD [{}{:+}]", r.to_str(), offset),
            Self::Imm(i) => write!(f, "{}", i),
            Self::Label(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum X86Instr {
    Mov(X86Operand, X86Operand),
    Add(X86Operand, X86Operand),
    Sub(X86Operand, X86Operand),
    Imul(X86Operand, X86Operand),
    Cmp(X86Operand, X86Operand),
    Test(X86Operand, X86Operand),
    Set(String, X86Operand),
    Movzx(X86Operand, X86Operand), // Zero-extend
    Jmp(String),
    Jcc(String, String),
    Push(X86Reg),
    Pop(X86Reg),
    Call(String),
    Syscall,
    Label(String),
    Comment(String),
}

fn op0(s: &mut String, mnemonic: &str) {
    use fmt::Write;
    let _ = writeln!(s, "        {}", mnemonic);
}

fn op1(s: &mut String, mnemonic: &str, a: impl fmt::Display) {
    use fmt::Write;
    let _ = writeln!(s, "        {:<8}{}", mnemonic, a);
}

fn op2(s: &mut String, mnemonic: &str, a: &X86Operand, b: &X86Operand) {
    use fmt::Write;
    let _ = writeln!(s, "        {:<8}{}, {}", mnemonic, a, b);
}

/// emit_asm converts X86 instructions to NASM assembly text
pub fn emit_asm(instructions: &[X86Instr]) -> String {
    let mut s = String::new();
    for instr in instructions {
        match instr {
            X86Instr::Label(l) => { s.push_str(l); s.push_str(":\n"); }
            X86Instr::Comment(c) => {
                s.push_str("        ;; -- ");
                s.push_str(c);
                s.push_str(" --\n");
            }
            X86Instr::Mov(d, src) => op2(&mut s, "mov", d, src),
            X86Instr::Add(d, src) => op2(&mut s, "add", d, src),
            X86Instr::Sub(d, src) => op2(&mut s, "sub", d, src),
            X86Instr::Imul(d, src) => op2(&mut s, "imul", d, src),
            X86Instr::Cmp(l, r) => op2(&mut s, "cmp", l, r),
            X86Instr::Test(l, r) => op2(&mut s, "test", l, r),
            X86Instr::Movzx(d, src) => op2(&mut s, "movzx", d, src),
            X86Instr::Set(c, d) => op1(&mut s, &format!("set{}", c), d),
            X86Instr::Jmp(l) => op1(&mut s, "jmp", l),
            X86Instr::Jcc(c, l) => op1(&mut s, &format!("j{}", c), l),
            X86Instr::Push(r) => op1(&mut s, "push", r.to_str()),
            X86Instr::Pop(r) => op1(&mut s, "pop", r.to_str()),
            X86Instr::Call(l) => op1(&mut s, "call", l),
            X86Instr::Syscall => op0(&mut s, "syscall"),
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── Operand formatting ─────────────────────────────────────
    #[test]
    fn operand_reg() {
        assert_eq!(X86Operand::Reg(X86Reg::Rax).to_string(), "rax");
        assert_eq!(X86Operand::Reg(X86Reg::Al).to_string(), "al");
    }

    #[test]
    fn operand_imm() {
        assert_eq!(X86Operand::Imm(42).to_string(), "42");
        assert_eq!(X86Operand::Imm(-1).to_string(), "-1");
    }

    #[test]
    fn operand_stack_slot() {
        let op = X86Operand::Mem(X86Reg::Rbp, -8);
        assert_eq!(op.to_string(), "QWORD [rbp-8]");
    }

    #[test]
    fn storable_operands() {
        assert!(X86Operand::Imm(i64::from(i32::MAX)).is_storable());
        assert!(X86Operand::Imm(i64::from(i32::MIN)).is_storable());
        assert!(!X86Operand::Imm(i64::from(i32::MAX) + 1).is_storable());
        assert!(!X86Operand::Mem(X86Reg::Rbp, -16).is_storable());
        assert!(X86Operand::Reg(X86Reg::Rax).is_storable());
    }

    // ─── emit_asm ───────────────────────────────────────────────
    #[test]
    fn emit_mov() {
        let instrs = vec![X86Instr::Mov(
            X86Operand::Reg(X86Reg::Rax),
            X86Operand::Imm(42),
        )];
        assert_eq!(emit_asm(&instrs), "        mov     rax, 42\n");
    }

    #[test]
    fn emit_store() {
        let instrs = vec![X86Instr::Mov(
            X86Operand::Mem(X86Reg::Rbp, -24),
            X86Operand::Reg(X86Reg::Rax),
        )];
        assert_eq!(emit_asm(&instrs), "        mov     QWORD [rbp-24], rax\n");
    }

    #[test]
    fn emit_label_and_comment() {
        let instrs = vec![
            X86Instr::Label("addr_0".to_string()),
            X86Instr::Comment("put".to_string()),
        ];
        assert_eq!(emit_asm(&instrs), "addr_0:\n        ;; -- put --\n");
    }

    #[test]
    fn emit_jmp_jcc() {
        let instrs = vec![
            X86Instr::Jmp("addr_1".to_string()),
            X86Instr::Jcc("nz".to_string(), "addr_2".to_string()),
        ];
        let asm = emit_asm(&instrs);
        assert!(asm.contains("jmp     addr_1"));
        assert!(asm.contains("jnz     addr_2"));
    }

    #[test]
    fn emit_cmp_set_movzx() {
        let instrs = vec![
            X86Instr::Cmp(X86Operand::Reg(X86Reg::Rax), X86Operand::Reg(X86Reg::Rbx)),
            X86Instr::Set("g".to_string(), X86Operand::Reg(X86Reg::Al)),
            X86Instr::Movzx(X86Operand::Reg(X86Reg::Rax), X86Operand::Reg(X86Reg::Al)),
        ];
        let asm = emit_asm(&instrs);
        assert!(asm.contains("cmp     rax, rbx"));
        assert!(asm.contains("setg    al"));
        assert!(asm.contains("movzx   rax, al"));
    }

    #[test]
    fn emit_push_pop_call_syscall() {
        let instrs = vec![
            X86Instr::Push(X86Reg::Rbx),
            X86Instr::Pop(X86Reg::Rbx),
            X86Instr::Call("put".to_string()),
            X86Instr::Syscall,
        ];
        assert_eq!(
            emit_asm(&instrs),
            "        push    rbx\n        pop     rbx\n        call    put\n        syscall\n"
        );
    }

    #[test]
    fn emit_empty() {
        assert_eq!(emit_asm(&[]), "");
    }
}
