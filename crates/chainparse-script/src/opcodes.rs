//! Bitcoin script opcode table.
//!
//! Named constants for every defined opcode byte, the direct-push range
//! bounds, and the lookups used when rendering scripts as ASM and when
//! reading small-integer opcodes.

// Push values
pub const OP_0: u8 = 0x00;
pub const OP_FALSE: u8 = OP_0;
/// First direct-push opcode: pushes the next byte.
pub const OP_DATA_1: u8 = 0x01;
pub const OP_DATA_20: u8 = 0x14;
pub const OP_DATA_32: u8 = 0x20;
pub const OP_DATA_33: u8 = 0x21;
pub const OP_DATA_65: u8 = 0x41;
/// Last direct-push opcode: pushes the next 75 bytes.
pub const OP_DATA_75: u8 = 0x4b;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_RESERVED: u8 = 0x50;
pub const OP_1: u8 = 0x51;
pub const OP_TRUE: u8 = OP_1;
pub const OP_2: u8 = 0x52;
pub const OP_3: u8 = 0x53;
pub const OP_4: u8 = 0x54;
pub const OP_5: u8 = 0x55;
pub const OP_6: u8 = 0x56;
pub const OP_7: u8 = 0x57;
pub const OP_8: u8 = 0x58;
pub const OP_9: u8 = 0x59;
pub const OP_10: u8 = 0x5a;
pub const OP_11: u8 = 0x5b;
pub const OP_12: u8 = 0x5c;
pub const OP_13: u8 = 0x5d;
pub const OP_14: u8 = 0x5e;
pub const OP_15: u8 = 0x5f;
pub const OP_16: u8 = 0x60;

// Flow control
pub const OP_NOP: u8 = 0x61;
pub const OP_VER: u8 = 0x62;
pub const OP_IF: u8 = 0x63;
pub const OP_NOTIF: u8 = 0x64;
pub const OP_VERIF: u8 = 0x65;
pub const OP_VERNOTIF: u8 = 0x66;
pub const OP_ELSE: u8 = 0x67;
pub const OP_ENDIF: u8 = 0x68;
pub const OP_VERIFY: u8 = 0x69;
pub const OP_RETURN: u8 = 0x6a;

// Stack
pub const OP_TOALTSTACK: u8 = 0x6b;
pub const OP_FROMALTSTACK: u8 = 0x6c;
pub const OP_2DROP: u8 = 0x6d;
pub const OP_2DUP: u8 = 0x6e;
pub const OP_3DUP: u8 = 0x6f;
pub const OP_2OVER: u8 = 0x70;
pub const OP_2ROT: u8 = 0x71;
pub const OP_2SWAP: u8 = 0x72;
pub const OP_IFDUP: u8 = 0x73;
pub const OP_DEPTH: u8 = 0x74;
pub const OP_DROP: u8 = 0x75;
pub const OP_DUP: u8 = 0x76;
pub const OP_NIP: u8 = 0x77;
pub const OP_OVER: u8 = 0x78;
pub const OP_PICK: u8 = 0x79;
pub const OP_ROLL: u8 = 0x7a;
pub const OP_ROT: u8 = 0x7b;
pub const OP_SWAP: u8 = 0x7c;
pub const OP_TUCK: u8 = 0x7d;

// Splice
pub const OP_CAT: u8 = 0x7e;
pub const OP_SUBSTR: u8 = 0x7f;
pub const OP_LEFT: u8 = 0x80;
pub const OP_RIGHT: u8 = 0x81;
pub const OP_SIZE: u8 = 0x82;

// Bitwise logic
pub const OP_INVERT: u8 = 0x83;
pub const OP_AND: u8 = 0x84;
pub const OP_OR: u8 = 0x85;
pub const OP_XOR: u8 = 0x86;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_RESERVED1: u8 = 0x89;
pub const OP_RESERVED2: u8 = 0x8a;

// Arithmetic
pub const OP_1ADD: u8 = 0x8b;
pub const OP_1SUB: u8 = 0x8c;
pub const OP_2MUL: u8 = 0x8d;
pub const OP_2DIV: u8 = 0x8e;
pub const OP_NEGATE: u8 = 0x8f;
pub const OP_ABS: u8 = 0x90;
pub const OP_NOT: u8 = 0x91;
pub const OP_0NOTEQUAL: u8 = 0x92;
pub const OP_ADD: u8 = 0x93;
pub const OP_SUB: u8 = 0x94;
pub const OP_MUL: u8 = 0x95;
pub const OP_DIV: u8 = 0x96;
pub const OP_MOD: u8 = 0x97;
pub const OP_LSHIFT: u8 = 0x98;
pub const OP_RSHIFT: u8 = 0x99;
pub const OP_BOOLAND: u8 = 0x9a;
pub const OP_BOOLOR: u8 = 0x9b;
pub const OP_NUMEQUAL: u8 = 0x9c;
pub const OP_NUMEQUALVERIFY: u8 = 0x9d;
pub const OP_NUMNOTEQUAL: u8 = 0x9e;
pub const OP_LESSTHAN: u8 = 0x9f;
pub const OP_GREATERTHAN: u8 = 0xa0;
pub const OP_LESSTHANOREQUAL: u8 = 0xa1;
pub const OP_GREATERTHANOREQUAL: u8 = 0xa2;
pub const OP_MIN: u8 = 0xa3;
pub const OP_MAX: u8 = 0xa4;
pub const OP_WITHIN: u8 = 0xa5;

// Crypto
pub const OP_RIPEMD160: u8 = 0xa6;
pub const OP_SHA1: u8 = 0xa7;
pub const OP_SHA256: u8 = 0xa8;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_HASH256: u8 = 0xaa;
pub const OP_CODESEPARATOR: u8 = 0xab;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_CHECKSIGVERIFY: u8 = 0xad;
pub const OP_CHECKMULTISIG: u8 = 0xae;
pub const OP_CHECKMULTISIGVERIFY: u8 = 0xaf;

// Expansion
pub const OP_NOP1: u8 = 0xb0;
pub const OP_CHECKLOCKTIMEVERIFY: u8 = 0xb1;
pub const OP_NOP2: u8 = OP_CHECKLOCKTIMEVERIFY;
pub const OP_CHECKSEQUENCEVERIFY: u8 = 0xb2;
pub const OP_NOP3: u8 = OP_CHECKSEQUENCEVERIFY;
pub const OP_NOP4: u8 = 0xb3;
pub const OP_NOP5: u8 = 0xb4;
pub const OP_NOP6: u8 = 0xb5;
pub const OP_NOP7: u8 = 0xb6;
pub const OP_NOP8: u8 = 0xb7;
pub const OP_NOP9: u8 = 0xb8;
pub const OP_NOP10: u8 = 0xb9;
pub const OP_CHECKSIGADD: u8 = 0xba;

/// Opcodes in this range and above are undefined.
pub const OP_INVALIDOPCODE: u8 = 0xff;

/// Return the canonical name of an opcode byte.
///
/// Direct pushes render as `OP_DATA_<n>`; bytes with no assigned meaning
/// render as `"OP_UNKNOWN"`.
pub fn opcode_to_string(op: u8) -> &'static str {
    match op {
        OP_0 => "OP_0",
        OP_DATA_1..=OP_DATA_75 => DATA_NAMES[(op - OP_DATA_1) as usize],
        OP_PUSHDATA1 => "OP_PUSHDATA1",
        OP_PUSHDATA2 => "OP_PUSHDATA2",
        OP_PUSHDATA4 => "OP_PUSHDATA4",
        OP_1NEGATE => "OP_1NEGATE",
        OP_RESERVED => "OP_RESERVED",
        OP_1 => "OP_1",
        OP_2 => "OP_2",
        OP_3 => "OP_3",
        OP_4 => "OP_4",
        OP_5 => "OP_5",
        OP_6 => "OP_6",
        OP_7 => "OP_7",
        OP_8 => "OP_8",
        OP_9 => "OP_9",
        OP_10 => "OP_10",
        OP_11 => "OP_11",
        OP_12 => "OP_12",
        OP_13 => "OP_13",
        OP_14 => "OP_14",
        OP_15 => "OP_15",
        OP_16 => "OP_16",
        OP_NOP => "OP_NOP",
        OP_VER => "OP_VER",
        OP_IF => "OP_IF",
        OP_NOTIF => "OP_NOTIF",
        OP_VERIF => "OP_VERIF",
        OP_VERNOTIF => "OP_VERNOTIF",
        OP_ELSE => "OP_ELSE",
        OP_ENDIF => "OP_ENDIF",
        OP_VERIFY => "OP_VERIFY",
        OP_RETURN => "OP_RETURN",
        OP_TOALTSTACK => "OP_TOALTSTACK",
        OP_FROMALTSTACK => "OP_FROMALTSTACK",
        OP_2DROP => "OP_2DROP",
        OP_2DUP => "OP_2DUP",
        OP_3DUP => "OP_3DUP",
        OP_2OVER => "OP_2OVER",
        OP_2ROT => "OP_2ROT",
        OP_2SWAP => "OP_2SWAP",
        OP_IFDUP => "OP_IFDUP",
        OP_DEPTH => "OP_DEPTH",
        OP_DROP => "OP_DROP",
        OP_DUP => "OP_DUP",
        OP_NIP => "OP_NIP",
        OP_OVER => "OP_OVER",
        OP_PICK => "OP_PICK",
        OP_ROLL => "OP_ROLL",
        OP_ROT => "OP_ROT",
        OP_SWAP => "OP_SWAP",
        OP_TUCK => "OP_TUCK",
        OP_CAT => "OP_CAT",
        OP_SUBSTR => "OP_SUBSTR",
        OP_LEFT => "OP_LEFT",
        OP_RIGHT => "OP_RIGHT",
        OP_SIZE => "OP_SIZE",
        OP_INVERT => "OP_INVERT",
        OP_AND => "OP_AND",
        OP_OR => "OP_OR",
        OP_XOR => "OP_XOR",
        OP_EQUAL => "OP_EQUAL",
        OP_EQUALVERIFY => "OP_EQUALVERIFY",
        OP_RESERVED1 => "OP_RESERVED1",
        OP_RESERVED2 => "OP_RESERVED2",
        OP_1ADD => "OP_1ADD",
        OP_1SUB => "OP_1SUB",
        OP_2MUL => "OP_2MUL",
        OP_2DIV => "OP_2DIV",
        OP_NEGATE => "OP_NEGATE",
        OP_ABS => "OP_ABS",
        OP_NOT => "OP_NOT",
        OP_0NOTEQUAL => "OP_0NOTEQUAL",
        OP_ADD => "OP_ADD",
        OP_SUB => "OP_SUB",
        OP_MUL => "OP_MUL",
        OP_DIV => "OP_DIV",
        OP_MOD => "OP_MOD",
        OP_LSHIFT => "OP_LSHIFT",
        OP_RSHIFT => "OP_RSHIFT",
        OP_BOOLAND => "OP_BOOLAND",
        OP_BOOLOR => "OP_BOOLOR",
        OP_NUMEQUAL => "OP_NUMEQUAL",
        OP_NUMEQUALVERIFY => "OP_NUMEQUALVERIFY",
        OP_NUMNOTEQUAL => "OP_NUMNOTEQUAL",
        OP_LESSTHAN => "OP_LESSTHAN",
        OP_GREATERTHAN => "OP_GREATERTHAN",
        OP_LESSTHANOREQUAL => "OP_LESSTHANOREQUAL",
        OP_GREATERTHANOREQUAL => "OP_GREATERTHANOREQUAL",
        OP_MIN => "OP_MIN",
        OP_MAX => "OP_MAX",
        OP_WITHIN => "OP_WITHIN",
        OP_RIPEMD160 => "OP_RIPEMD160",
        OP_SHA1 => "OP_SHA1",
        OP_SHA256 => "OP_SHA256",
        OP_HASH160 => "OP_HASH160",
        OP_HASH256 => "OP_HASH256",
        OP_CODESEPARATOR => "OP_CODESEPARATOR",
        OP_CHECKSIG => "OP_CHECKSIG",
        OP_CHECKSIGVERIFY => "OP_CHECKSIGVERIFY",
        OP_CHECKMULTISIG => "OP_CHECKMULTISIG",
        OP_CHECKMULTISIGVERIFY => "OP_CHECKMULTISIGVERIFY",
        OP_NOP1 => "OP_NOP1",
        OP_CHECKLOCKTIMEVERIFY => "OP_CHECKLOCKTIMEVERIFY",
        OP_CHECKSEQUENCEVERIFY => "OP_CHECKSEQUENCEVERIFY",
        OP_NOP4 => "OP_NOP4",
        OP_NOP5 => "OP_NOP5",
        OP_NOP6 => "OP_NOP6",
        OP_NOP7 => "OP_NOP7",
        OP_NOP8 => "OP_NOP8",
        OP_NOP9 => "OP_NOP9",
        OP_NOP10 => "OP_NOP10",
        OP_CHECKSIGADD => "OP_CHECKSIGADD",
        _ => "OP_UNKNOWN",
    }
}

const DATA_NAMES: [&str; 75] = [
    "OP_DATA_1",
    "OP_DATA_2",
    "OP_DATA_3",
    "OP_DATA_4",
    "OP_DATA_5",
    "OP_DATA_6",
    "OP_DATA_7",
    "OP_DATA_8",
    "OP_DATA_9",
    "OP_DATA_10",
    "OP_DATA_11",
    "OP_DATA_12",
    "OP_DATA_13",
    "OP_DATA_14",
    "OP_DATA_15",
    "OP_DATA_16",
    "OP_DATA_17",
    "OP_DATA_18",
    "OP_DATA_19",
    "OP_DATA_20",
    "OP_DATA_21",
    "OP_DATA_22",
    "OP_DATA_23",
    "OP_DATA_24",
    "OP_DATA_25",
    "OP_DATA_26",
    "OP_DATA_27",
    "OP_DATA_28",
    "OP_DATA_29",
    "OP_DATA_30",
    "OP_DATA_31",
    "OP_DATA_32",
    "OP_DATA_33",
    "OP_DATA_34",
    "OP_DATA_35",
    "OP_DATA_36",
    "OP_DATA_37",
    "OP_DATA_38",
    "OP_DATA_39",
    "OP_DATA_40",
    "OP_DATA_41",
    "OP_DATA_42",
    "OP_DATA_43",
    "OP_DATA_44",
    "OP_DATA_45",
    "OP_DATA_46",
    "OP_DATA_47",
    "OP_DATA_48",
    "OP_DATA_49",
    "OP_DATA_50",
    "OP_DATA_51",
    "OP_DATA_52",
    "OP_DATA_53",
    "OP_DATA_54",
    "OP_DATA_55",
    "OP_DATA_56",
    "OP_DATA_57",
    "OP_DATA_58",
    "OP_DATA_59",
    "OP_DATA_60",
    "OP_DATA_61",
    "OP_DATA_62",
    "OP_DATA_63",
    "OP_DATA_64",
    "OP_DATA_65",
    "OP_DATA_66",
    "OP_DATA_67",
    "OP_DATA_68",
    "OP_DATA_69",
    "OP_DATA_70",
    "OP_DATA_71",
    "OP_DATA_72",
    "OP_DATA_73",
    "OP_DATA_74",
    "OP_DATA_75",
];

/// Look up an instruction byte by its canonical name.
///
/// Accepts the aliases OP_FALSE, OP_TRUE, OP_NOP2 and OP_NOP3. Push lead
/// names (`OP_DATA_<n>`, OP_PUSHDATA1/2/4) are not instructions and return
/// `None`.
pub fn string_to_opcode(name: &str) -> Option<u8> {
    match name {
        "OP_FALSE" => return Some(OP_FALSE),
        "OP_TRUE" => return Some(OP_TRUE),
        "OP_NOP2" => return Some(OP_NOP2),
        "OP_NOP3" => return Some(OP_NOP3),
        _ => {}
    }
    (0..=u8::MAX)
        .filter(|op| !(OP_DATA_1..=OP_PUSHDATA4).contains(op))
        .find(|&op| opcode_to_string(op) == name && name != "OP_UNKNOWN")
}

/// The integer pushed by OP_0 and OP_1 .. OP_16, if `op` is one of them.
pub fn small_int_value(op: u8) -> Option<u8> {
    match op {
        OP_0 => Some(0),
        OP_1..=OP_16 => Some(op - (OP_1 - 1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_names() {
        assert_eq!(opcode_to_string(OP_0), "OP_0");
        assert_eq!(opcode_to_string(OP_DUP), "OP_DUP");
        assert_eq!(opcode_to_string(OP_CHECKMULTISIG), "OP_CHECKMULTISIG");
        assert_eq!(opcode_to_string(OP_DATA_20), "OP_DATA_20");
        assert_eq!(opcode_to_string(OP_DATA_75), "OP_DATA_75");
        assert_eq!(opcode_to_string(OP_CHECKLOCKTIMEVERIFY), "OP_CHECKLOCKTIMEVERIFY");
        assert_eq!(opcode_to_string(0xfe), "OP_UNKNOWN");
    }

    #[test]
    fn test_string_to_opcode() {
        assert_eq!(string_to_opcode("OP_HASH160"), Some(OP_HASH160));
        assert_eq!(string_to_opcode("OP_FALSE"), Some(0x00));
        assert_eq!(string_to_opcode("OP_TRUE"), Some(0x51));
        assert_eq!(string_to_opcode("OP_16"), Some(0x60));
        assert_eq!(string_to_opcode("OP_UNKNOWN"), None);
        assert_eq!(string_to_opcode("deadbeef"), None);
        assert_eq!(string_to_opcode("OP_DATA_20"), None);
        assert_eq!(string_to_opcode("OP_PUSHDATA1"), None);
        assert_eq!(string_to_opcode("OP_PUSHDATA4"), None);
        assert_eq!(string_to_opcode("OP_1NEGATE"), Some(OP_1NEGATE));
    }

    #[test]
    fn test_small_int_values() {
        assert_eq!(small_int_value(OP_0), Some(0));
        assert_eq!(small_int_value(OP_1), Some(1));
        assert_eq!(small_int_value(OP_2), Some(2));
        assert_eq!(small_int_value(OP_16), Some(16));
        assert_eq!(small_int_value(OP_1NEGATE), None);
        assert_eq!(small_int_value(OP_DATA_1), None);
        assert_eq!(small_int_value(OP_RESERVED), None);
    }
}
