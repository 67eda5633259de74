//! Unit tests for 6809 instruction behavior.

use emu_core::{Cpu, Observable, SimpleBus, Value};
use motorola_6809::flags::{C, E, F, H, I, N, V, Z};
use motorola_6809::{ConditionCodes, CpuFault, Mc6809, Page};

/// Load a program at $0200 and point PC at it, with both stacks set up.
fn setup(program: &[u8]) -> (Mc6809, SimpleBus) {
    let mut bus = SimpleBus::new();
    bus.load(0x0200, program);
    let mut cpu = Mc6809::new();
    cpu.regs.pc = 0x0200;
    cpu.regs.s = 0x8000;
    cpu.regs.u = 0x7000;
    cpu.regs.cc = ConditionCodes(0);
    (cpu, bus)
}

/// Run one instruction, which must decode.
fn step(cpu: &mut Mc6809, bus: &mut SimpleBus) -> u32 {
    cpu.step(bus).expect("instruction should decode")
}

#[test]
fn test_clr_indexed_constant_offset_keeps_base() {
    let (mut cpu, mut bus) = setup(&[0x6F, 0x0B]); // CLR 11,X
    cpu.regs.x = 0xC800;
    cpu.regs.cc = ConditionCodes(N | V | C);
    bus.poke(0xC80B, 0x55);

    assert_eq!(step(&mut cpu, &mut bus), 7);
    assert_eq!(bus.peek(0xC80B), 0x00);
    assert_eq!(cpu.regs.x, 0xC800, "5-bit offset must not write back");
    assert_eq!(cpu.regs.cc.0, Z);
    assert_eq!(cpu.regs.pc, 0x0202);
}

#[test]
fn test_adda_signed_overflow() {
    let (mut cpu, mut bus) = setup(&[0x8B, 0x01]); // ADDA #$01
    cpu.regs.a = 0x7F;

    assert_eq!(step(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.a, 0x80);
    assert_eq!(cpu.regs.cc.0, N | V | H);
}

#[test]
fn test_suba_borrow_keeps_half_carry() {
    let (mut cpu, mut bus) = setup(&[0x80, 0x01]); // SUBA #$01
    cpu.regs.a = 0x00;
    cpu.regs.cc = ConditionCodes(H);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0xFF);
    assert_eq!(cpu.regs.cc.0, N | C | H);
}

#[test]
fn test_daa_after_bcd_add() {
    // ADDA #$28; DAA
    let (mut cpu, mut bus) = setup(&[0x8B, 0x28, 0x19]);
    cpu.regs.a = 0x19;

    step(&mut cpu, &mut bus);
    assert_eq!(step(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.a, 0x47);
    assert!(!cpu.regs.cc.carry());
}

#[test]
fn test_daa_low_nibble_correction() {
    let (mut cpu, mut bus) = setup(&[0x19]); // DAA
    cpu.regs.a = 0x0F;
    cpu.regs.cc = ConditionCodes(H);

    assert_eq!(step(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.a, 0x15);
    assert!(!cpu.regs.cc.carry());
}

#[test]
fn test_compare_is_idempotent() {
    // CMPA #$42; CMPA #$42
    let (mut cpu, mut bus) = setup(&[0x81, 0x42, 0x81, 0x42]);
    cpu.regs.a = 0x42;

    step(&mut cpu, &mut bus);
    let first = cpu.regs;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(cpu.regs.cc, first.cc);
    assert!(cpu.regs.cc.zero());
}

#[test]
fn test_cmpd_page1() {
    let (mut cpu, mut bus) = setup(&[0x10, 0x83, 0x12, 0x35]); // CMPD #$1235
    cpu.regs.set_d(0x1234);

    assert_eq!(step(&mut cpu, &mut bus), 5);
    assert_eq!(cpu.regs.pc, 0x0204);
    assert_eq!(cpu.regs.d(), 0x1234);
    assert_eq!(cpu.regs.cc.0, N | C);
}

#[test]
fn test_cmps_page2_direct() {
    let (mut cpu, mut bus) = setup(&[0x11, 0x9C, 0x40]); // CMPS <$40
    cpu.regs.dp = 0x12;
    bus.load(0x1240, &[0x80, 0x00]);

    assert_eq!(step(&mut cpu, &mut bus), 7);
    assert!(cpu.regs.cc.zero());
}

#[test]
fn test_direct_page_addressing() {
    let (mut cpu, mut bus) = setup(&[0x96, 0x34]); // LDA <$34
    cpu.regs.dp = 0x12;
    bus.poke(0x1234, 0x80);

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.a, 0x80);
    assert!(cpu.regs.cc.negative());
}

#[test]
fn test_16bit_load_store() {
    // LDD #$8000; STD $4000; LDY #$0000
    let (mut cpu, mut bus) = setup(&[
        0xCC, 0x80, 0x00, // LDD #$8000
        0xFD, 0x40, 0x00, // STD $4000
        0x10, 0x8E, 0x00, 0x00, // LDY #$0000
    ]);
    cpu.regs.cc = ConditionCodes(V);

    assert_eq!(step(&mut cpu, &mut bus), 3);
    assert_eq!((cpu.regs.a, cpu.regs.b), (0x80, 0x00));
    assert_eq!(cpu.regs.cc.0, N);

    assert_eq!(step(&mut cpu, &mut bus), 6);
    assert_eq!(bus.peek16(0x4000), 0x8000);

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.y, 0);
    assert_eq!(cpu.regs.cc.0, Z);
}

#[test]
fn test_addd_subd() {
    // ADDD #$0001; SUBD #$0002
    let (mut cpu, mut bus) = setup(&[0xC3, 0x00, 0x01, 0x83, 0x00, 0x02]);
    cpu.regs.set_d(0x7FFF);

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.d(), 0x8000);
    assert_eq!(cpu.regs.cc.0, N | V);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.d(), 0x7FFE);
    assert_eq!(cpu.regs.cc.0, V);
}

#[test]
fn test_memory_read_modify_write() {
    // INC $4000; ASL $4000; TST $4000
    let (mut cpu, mut bus) = setup(&[0x7C, 0x40, 0x00, 0x78, 0x40, 0x00, 0x7D, 0x40, 0x00]);
    bus.poke(0x4000, 0x3F);

    assert_eq!(step(&mut cpu, &mut bus), 7);
    assert_eq!(bus.peek(0x4000), 0x40);

    step(&mut cpu, &mut bus);
    assert_eq!(bus.peek(0x4000), 0x80);
    assert_eq!(cpu.regs.cc.0, N | V);

    step(&mut cpu, &mut bus);
    assert_eq!(bus.peek(0x4000), 0x80);
    assert_eq!(cpu.regs.cc.0, N);
}

#[test]
fn test_accumulator_unary_ops() {
    // NEGA; COMB; CLRA
    let (mut cpu, mut bus) = setup(&[0x40, 0x53, 0x4F]);
    cpu.regs.a = 0x01;
    cpu.regs.b = 0x0F;

    assert_eq!(step(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.a, 0xFF);
    assert_eq!(cpu.regs.cc.0, N | C);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.b, 0xF0);
    assert_eq!(cpu.regs.cc.0, N | C);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.cc.0, Z);
}

#[test]
fn test_asr_sets_overflow_from_sign_and_carry() {
    // ASRA; ASRB
    let (mut cpu, mut bus) = setup(&[0x47, 0x57]);
    cpu.regs.a = 0x01;
    cpu.regs.b = 0x81;

    assert_eq!(step(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.cc.0, Z | V | C);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.b, 0xC0);
    assert_eq!(cpu.regs.cc.0, N | C);
}

#[test]
fn test_pshs_puls_round_trip() {
    // PSHS CC,A,B,DP,X,Y,U,PC; PULS CC,A,B,DP,X,Y,U,PC
    let (mut cpu, mut bus) = setup(&[0x34, 0xFF, 0x35, 0xFF]);
    cpu.regs.a = 0x11;
    cpu.regs.b = 0x22;
    cpu.regs.dp = 0x33;
    cpu.regs.x = 0x4444;
    cpu.regs.y = 0x5555;
    cpu.regs.cc = ConditionCodes(N | C);

    assert_eq!(step(&mut cpu, &mut bus), 17);
    assert_eq!(cpu.regs.s, 0x8000 - 12);
    let pushed = cpu.regs;

    // Frame layout, lowest address first
    assert_eq!(bus.peek(0x7FF4), N | C);
    assert_eq!(bus.peek(0x7FF5), 0x11);
    assert_eq!(bus.peek(0x7FF6), 0x22);
    assert_eq!(bus.peek(0x7FF7), 0x33);
    assert_eq!(bus.peek16(0x7FF8), 0x4444);
    assert_eq!(bus.peek16(0x7FFA), 0x5555);
    assert_eq!(bus.peek16(0x7FFC), 0x7000);
    assert_eq!(bus.peek16(0x7FFE), 0x0202);

    cpu.regs.a = 0;
    cpu.regs.b = 0;
    cpu.regs.dp = 0;
    cpu.regs.x = 0;
    cpu.regs.y = 0;
    cpu.regs.u = 0;
    cpu.regs.cc = ConditionCodes(0);

    assert_eq!(step(&mut cpu, &mut bus), 17);
    assert_eq!(cpu.regs.s, 0x8000);
    assert_eq!(cpu.regs.pc, 0x0202);
    assert_eq!(
        Mc6809Snapshot::from(cpu.regs),
        Mc6809Snapshot::from(pushed),
        "registers should come back"
    );
}

/// Registers compared by the round-trip test (PC and S move by design).
#[derive(Debug, PartialEq, Eq)]
struct Mc6809Snapshot {
    a: u8,
    b: u8,
    dp: u8,
    x: u16,
    y: u16,
    u: u16,
    cc: u8,
}

impl From<motorola_6809::Registers> for Mc6809Snapshot {
    fn from(r: motorola_6809::Registers) -> Self {
        Self {
            a: r.a,
            b: r.b,
            dp: r.dp,
            x: r.x,
            y: r.y,
            u: r.u,
            cc: r.cc.0,
        }
    }
}

#[test]
fn test_pshu_pulu() {
    // PSHU A,S; PULU B,S
    let (mut cpu, mut bus) = setup(&[0x36, 0x42, 0x37, 0x44]);
    cpu.regs.a = 0x99;

    assert_eq!(step(&mut cpu, &mut bus), 5 + 3);
    assert_eq!(cpu.regs.u, 0x7000 - 3);
    assert_eq!(bus.peek(0x6FFD), 0x99);
    assert_eq!(bus.peek16(0x6FFE), 0x8000);

    cpu.regs.s = 0x1234;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.b, 0x99);
    assert_eq!(cpu.regs.s, 0x8000);
    assert_eq!(cpu.regs.u, 0x7000);
}

#[test]
fn test_tfr_exg() {
    // TFR A,B; EXG X,Y; TFR A,X; TFR X,A
    let (mut cpu, mut bus) = setup(&[0x1F, 0x89, 0x1E, 0x12, 0x1F, 0x81, 0x1F, 0x18]);
    cpu.regs.a = 0x5A;
    cpu.regs.x = 0x1111;
    cpu.regs.y = 0x2222;

    assert_eq!(step(&mut cpu, &mut bus), 6);
    assert_eq!(cpu.regs.b, 0x5A);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!((cpu.regs.x, cpu.regs.y), (0x2222, 0x1111));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.x, 0xFF5A);

    cpu.regs.x = 0x1234;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x34);
}

#[test]
fn test_tfr_to_cc() {
    let (mut cpu, mut bus) = setup(&[0x1F, 0x8A]); // TFR A,CC
    cpu.regs.a = I | F | Z;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.cc.0, I | F | Z);
}

#[test]
fn test_mul_sex_abx() {
    // MUL; SEX; ABX
    let (mut cpu, mut bus) = setup(&[0x3D, 0x1D, 0x3A]);
    cpu.regs.a = 0x0C;
    cpu.regs.b = 0x64;
    cpu.regs.x = 0x1000;

    assert_eq!(step(&mut cpu, &mut bus), 11);
    assert_eq!(cpu.regs.d(), 0x04B0);
    assert!(cpu.regs.cc.carry());

    assert_eq!(step(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.d(), 0xFFB0);
    assert!(cpu.regs.cc.negative());

    cpu.regs.b = 0xFF;
    assert_eq!(step(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.regs.x, 0x10FF, "ABX treats B as unsigned");
}

#[test]
fn test_lea() {
    // LEAX 5,X; LEAX -1,Y; LEAS -2,S
    let (mut cpu, mut bus) = setup(&[0x30, 0x05, 0x30, 0x3F, 0x32, 0x7E]);
    cpu.regs.x = 0x1000;
    cpu.regs.y = 0x0001;

    assert_eq!(step(&mut cpu, &mut bus), 5);
    assert_eq!(cpu.regs.x, 0x1005);
    assert!(!cpu.regs.cc.zero());

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.x, 0x0000);
    assert!(cpu.regs.cc.zero());

    cpu.regs.cc = ConditionCodes(0);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.s, 0x7FFE);
    assert_eq!(cpu.regs.cc.0, 0, "LEAS leaves flags alone");
}

#[test]
fn test_short_branches() {
    // BEQ +2; NOP; NOP; BNE -2 (not taken)
    let (mut cpu, mut bus) = setup(&[0x27, 0x02, 0x12, 0x12, 0x26, 0xFE]);
    cpu.regs.cc = ConditionCodes(Z);

    assert_eq!(step(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.regs.pc, 0x0204);

    assert_eq!(step(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.regs.pc, 0x0206);
}

#[test]
fn test_long_branch_timing() {
    // LBNE +$10 taken, then LBEQ not taken at the target
    let (mut cpu, mut bus) = setup(&[0x10, 0x26, 0x00, 0x10]);
    bus.load(0x0214, &[0x10, 0x27, 0x80, 0x00]);

    assert_eq!(step(&mut cpu, &mut bus), 6);
    assert_eq!(cpu.regs.pc, 0x0214);

    assert_eq!(step(&mut cpu, &mut bus), 5);
    assert_eq!(cpu.regs.pc, 0x0218);
}

#[test]
fn test_lbra_backwards() {
    let (mut cpu, mut bus) = setup(&[0x16, 0xFF, 0xFD]); // LBRA to itself
    assert_eq!(step(&mut cpu, &mut bus), 5);
    assert_eq!(cpu.regs.pc, 0x0200);
}

#[test]
fn test_jsr_rts() {
    let (mut cpu, mut bus) = setup(&[0xBD, 0x03, 0x00]); // JSR $0300
    bus.poke(0x0300, 0x39); // RTS

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x0300);
    assert_eq!(cpu.regs.s, 0x7FFE);
    assert_eq!(bus.peek16(0x7FFE), 0x0203);

    assert_eq!(step(&mut cpu, &mut bus), 5);
    assert_eq!(cpu.regs.pc, 0x0203);
    assert_eq!(cpu.regs.s, 0x8000);
}

#[test]
fn test_bsr_lbsr() {
    // BSR +$10; at $0212: LBSR -$0100
    let (mut cpu, mut bus) = setup(&[0x8D, 0x10]);
    bus.load(0x0212, &[0x17, 0xFF, 0x00]);

    assert_eq!(step(&mut cpu, &mut bus), 7);
    assert_eq!(cpu.regs.pc, 0x0212);
    assert_eq!(bus.peek16(0x7FFE), 0x0202);

    assert_eq!(step(&mut cpu, &mut bus), 9);
    assert_eq!(cpu.regs.pc, 0x0115);
    assert_eq!(bus.peek16(0x7FFC), 0x0215);
}

#[test]
fn test_orcc_andcc() {
    // ORCC #$50; ANDCC #$AF
    let (mut cpu, mut bus) = setup(&[0x1A, 0x50, 0x1C, 0xAF]);

    assert_eq!(step(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.regs.cc.0, I | F);

    assert_eq!(step(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.regs.cc.0, 0);
}

#[test]
fn test_illegal_opcode_faults_without_side_effects() {
    let (mut cpu, mut bus) = setup(&[0x01]);
    let before = cpu.regs;

    assert_eq!(
        cpu.step(&mut bus),
        Err(CpuFault::IllegalOpcode {
            address: 0x0200,
            page: Page::Page0,
            opcode: 0x01,
        })
    );
    assert_eq!(cpu.regs, before);
    assert_eq!(cpu.cycles(), 0);
    assert_eq!(cpu.instructions(), 0);
}

#[test]
fn test_double_prefix_is_illegal() {
    let (mut cpu, mut bus) = setup(&[0x10, 0x10, 0x12]);

    assert_eq!(
        cpu.step(&mut bus),
        Err(CpuFault::IllegalOpcode {
            address: 0x0200,
            page: Page::Page1,
            opcode: 0x10,
        })
    );
    assert_eq!(cpu.regs.pc, 0x0200);
}

#[test]
fn test_reserved_postbyte_faults_before_writeback() {
    // LDA [,X+] is reserved
    let (mut cpu, mut bus) = setup(&[0xA6, 0x90]);
    cpu.regs.x = 0x3000;
    let before = cpu.regs;

    assert_eq!(
        cpu.step(&mut bus),
        Err(CpuFault::IllegalAddressingPostbyte {
            address: 0x0200,
            postbyte: 0x90,
        })
    );
    assert_eq!(cpu.regs, before);
}

#[test]
fn test_counters_and_observation() {
    let (mut cpu, mut bus) = setup(&[0x12, 0x86, 0x05]);
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);

    assert_eq!(cpu.cycles(), 4);
    assert_eq!(cpu.instructions(), 2);
    assert_eq!(cpu.query("a"), Some(Value::U8(0x05)));
    assert_eq!(cpu.query("pc"), Some(Value::U16(0x0203)));
    assert_eq!(cpu.query("cc.z"), Some(Value::Bool(false)));
    assert_eq!(cpu.query("cycles"), Some(Value::U64(4)));
}

#[test]
fn test_trace_records_recent_instructions() {
    let (mut cpu, mut bus) = setup(&[0x12, 0x86, 0x05, 0x4C]);
    cpu.enable_trace(2);
    for _ in 0..3 {
        step(&mut cpu, &mut bus);
    }

    let trace: Vec<_> = cpu.trace().collect();
    assert_eq!(trace.len(), 2);
    assert_eq!(trace[0].pc, 0x0201);
    assert_eq!(trace[0].mnemonic, "LDA");
    assert_eq!(trace[1].mnemonic, "INCA");
    assert_eq!(trace[1].registers.a, 0x06);

    cpu.disable_trace();
    assert_eq!(cpu.trace().count(), 0);
}

#[test]
fn test_entire_flag_survives_andcc() {
    let (mut cpu, mut bus) = setup(&[0x1C, 0xFF]); // ANDCC #$FF
    cpu.regs.cc = ConditionCodes(E | H);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.cc.0, E | H);
}
