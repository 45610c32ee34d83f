//! Shared test code.

include!("../tests/common.rs");

pub(crate) mod writer {
    //! Byte-level charstring and DICT fixtures.
    #![allow(dead_code)]

    // The writer module is derived from ttf-parser, licenced under Apache-2.0.
    // https://github.com/RazrFalcon/ttf-parser/blob/439aaaebd50eb8aed66302e3c1b51fae047f85b2/src/writer.rs

    #[allow(missing_debug_implementations)]
    #[derive(Clone, Copy)]
    pub enum Value {
        Raw(&'static [u8]),
        UInt8(u8),
        Int16(i16),
        UInt16(u16),
        Int32(i32),
        UInt32(u32),
        /// An integer operand in the shared DICT/charstring encoding.
        CFFInt(i32),
        /// A Type 2 16.16 fixed point operand.
        Fixed(f32),
        /// A one byte operator.
        Op(u8),
        /// An escaped (`12 x`) operator.
        EscOp(u8),
    }

    pub fn convert(values: &[Value]) -> Vec<u8> {
        let mut data = Vec::with_capacity(256);
        for v in values {
            convert_type(*v, &mut data);
        }

        data
    }

    pub fn convert_type(value: Value, data: &mut Vec<u8>) {
        match value {
            Value::Raw(bytes) => {
                data.extend_from_slice(bytes);
            }
            Value::UInt8(n) => {
                data.extend_from_slice(&u8::to_be_bytes(n));
            }
            Value::Int16(n) => {
                data.extend_from_slice(&i16::to_be_bytes(n));
            }
            Value::UInt16(n) => {
                data.extend_from_slice(&u16::to_be_bytes(n));
            }
            Value::Int32(n) => {
                data.extend_from_slice(&i32::to_be_bytes(n));
            }
            Value::UInt32(n) => {
                data.extend_from_slice(&u32::to_be_bytes(n));
            }
            Value::CFFInt(n) => data.extend(super::cff_int(n)),
            Value::Fixed(n) => {
                let n = (n * 65536.0).round() as i32;
                data.push(255);
                data.extend_from_slice(&i32::to_be_bytes(n));
            }
            Value::Op(op) => data.push(op),
            Value::EscOp(op) => data.extend_from_slice(&[12, op]),
        }
    }

    #[derive(Debug)]
    pub struct Writer {
        pub data: Vec<u8>,
    }

    impl Writer {
        pub fn new() -> Self {
            Writer {
                data: Vec::with_capacity(256),
            }
        }

        pub fn offset(&self) -> usize {
            self.data.len()
        }

        pub fn write(&mut self, value: Value) {
            convert_type(value, &mut self.data);
        }
    }
}
