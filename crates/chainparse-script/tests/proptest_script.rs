use proptest::prelude::*;

use chainparse_script::operation::{encode_operations, tokenize};
use chainparse_script::{NetworkParams, Operation, PushEncoding, Script, ScriptError, ScriptPubKey};

/// Any opcode byte that is not a push lead byte.
fn instruction() -> impl Strategy<Value = Operation> {
    any::<u8>()
        .prop_filter("push lead byte", |b| !(0x01..=0x4e).contains(b))
        .prop_map(Operation::Instruction)
}

/// A push whose operand fits its encoding, minimal or not.
fn push() -> impl Strategy<Value = Operation> {
    (0u8..4, prop::collection::vec(any::<u8>(), 0..300)).prop_map(|(kind, mut data)| {
        let encoding = match kind {
            0 if !data.is_empty() => {
                data.truncate(75);
                PushEncoding::Direct
            }
            0 | 1 => {
                data.truncate(255);
                PushEncoding::PushData1
            }
            2 => PushEncoding::PushData2,
            _ => PushEncoding::PushData4,
        };
        Operation::Push { encoding, data }
    })
}

fn operations() -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(prop_oneof![instruction(), push()], 0..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn operations_encode_tokenize_roundtrip(ops in operations()) {
        let bytes = encode_operations(&ops).unwrap();
        prop_assert_eq!(tokenize(&bytes).unwrap(), ops);
    }

    #[test]
    fn tokenize_encode_roundtrip(ops in operations()) {
        let script = Script::from_operations(&ops).unwrap();
        let reencoded = encode_operations(script.operations().unwrap()).unwrap();
        prop_assert_eq!(&reencoded[..], script.to_bytes());
    }

    #[test]
    fn arbitrary_bytes_never_panic(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let script = ScriptPubKey::from_bytes(&data);
        match script.operations() {
            Ok(ops) => {
                let reencoded = encode_operations(ops).unwrap();
                prop_assert_eq!(&reencoded[..], &data[..]);
            }
            Err(e) => {
                let is_malformed = matches!(e, ScriptError::MalformedScript { .. });
                prop_assert!(is_malformed, "unexpected error {:?}", e);
            }
        }
        let _ = script.script_type();
        let _ = script.output_address(&NetworkParams::MAINNET);
    }

    #[test]
    fn truncating_a_push_is_malformed(data in prop::collection::vec(any::<u8>(), 1..200), cut in 1usize..200) {
        let mut bytes = encode_operations(&[Operation::push(&data).unwrap()]).unwrap();
        let cut = cut.min(data.len());
        bytes.truncate(bytes.len() - cut);
        let is_malformed = matches!(tokenize(&bytes), Err(ScriptError::MalformedScript { .. }));
        prop_assert!(is_malformed);
    }

    #[test]
    fn script_hex_roundtrip(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let script = Script::from_bytes(&data);
        let script2 = Script::from_hex(&script.to_hex()).unwrap();
        prop_assert_eq!(script, script2);
    }
}
