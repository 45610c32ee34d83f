//! Encodings map single byte character codes to glyphs in name-keyed fonts.
//!
//! Refer to Section 12 of Technical Note #5176.

use std::convert::TryFrom;

use super::{Charset, Range, SID};
use crate::binary::read::{ReadArray, ReadBinary, ReadCtxt, ReadFrom};
use crate::binary::{U16Be, U8};
use crate::error::ParseError;

#[derive(Clone)]
pub enum Encoding<'a> {
    Standard,
    Expert,
    Custom(CustomEncoding<'a>),
}

#[derive(Clone)]
pub enum CustomEncoding<'a> {
    Format0 {
        codes: ReadArray<'a, U8>,
        supplements: ReadArray<'a, Supplement>,
    },
    Format1 {
        ranges: ReadArray<'a, Range<u8, u8>>,
        supplements: ReadArray<'a, Supplement>,
    },
}

/// An additional code for an already encoded glyph, identified by its SID.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Supplement {
    pub code: u8,
    pub sid: SID,
}

impl ReadFrom for Supplement {
    type ReadType = (U8, U16Be);
    fn read_from((code, sid): (u8, u16)) -> Self {
        Supplement { code, sid }
    }
}

impl<'b> ReadBinary for CustomEncoding<'b> {
    type HostType<'a> = CustomEncoding<'a>;

    fn read<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<Self::HostType<'a>, ParseError> {
        // First byte indicates the format of the encoding data. The high-order bit is set when
        // the encoding is followed by supplements for multiply-encoded glyphs.
        let format = ctxt.read::<U8>()?;
        let encoding = match format & 0x7F {
            0 => {
                let ncodes = ctxt.read::<U8>()?;
                let codes = ctxt.read_array::<U8>(usize::from(ncodes))?;
                let supplements = read_supplements(ctxt, format)?;
                CustomEncoding::Format0 { codes, supplements }
            }
            1 => {
                let nranges = ctxt.read::<U8>()?;
                let ranges = ctxt.read_array::<Range<u8, u8>>(usize::from(nranges))?;
                let supplements = read_supplements(ctxt, format)?;
                CustomEncoding::Format1 {
                    ranges,
                    supplements,
                }
            }
            _ => return Err(ParseError::BadValue),
        };

        Ok(encoding)
    }
}

fn read_supplements<'a>(
    ctxt: &mut ReadCtxt<'a>,
    format: u8,
) -> Result<ReadArray<'a, Supplement>, ParseError> {
    if format & 0x80 == 0x80 {
        let nsups = ctxt.read::<U8>()?;
        ctxt.read_array::<Supplement>(usize::from(nsups))
            .map_err(ParseError::from)
    } else {
        Ok(ReadArray::empty())
    }
}

impl<'a> Encoding<'a> {
    /// Map `code` to a glyph of the font with `charset`. Returns 0 if the code is not encoded.
    pub fn glyph_id(&self, code: u8, charset: &Charset<'_>) -> u16 {
        let glyph_for_sid = |sid: SID| charset.glyph_for_sid(sid).unwrap_or(0);
        match self {
            Encoding::Standard => glyph_for_sid(SID::from(STANDARD_ENCODING[usize::from(code)])),
            Encoding::Expert => glyph_for_sid(EXPERT_ENCODING[usize::from(code)]),
            Encoding::Custom(custom) => custom.glyph_id(code, charset),
        }
    }
}

impl<'a> CustomEncoding<'a> {
    pub fn supplements(&self) -> &ReadArray<'a, Supplement> {
        match self {
            CustomEncoding::Format0 { supplements, .. }
            | CustomEncoding::Format1 { supplements, .. } => supplements,
        }
    }

    /// Map `code` to a glyph id. Returns 0 if the code is not encoded.
    pub fn glyph_id(&self, code: u8, charset: &Charset<'_>) -> u16 {
        // Supplements take precedence over the base encoding
        if let Some(supplement) = self
            .supplements()
            .iter()
            .find(|supplement| supplement.code == code)
        {
            return charset.glyph_for_sid(supplement.sid).unwrap_or(0);
        }

        // As with charsets the arrays begin with glyph id 1
        let glyph_id = match self {
            CustomEncoding::Format0 { codes, .. } => codes
                .iter()
                .position(|encoded| encoded == code)
                .map(|index| index + 1),
            CustomEncoding::Format1 { ranges, .. } => {
                let mut glyph_id = 1;
                ranges.iter().find_map(|range| {
                    let first = usize::from(range.first);
                    let code = usize::from(code);
                    if first <= code && code <= first + usize::from(range.n_left) {
                        Some(glyph_id + code - first)
                    } else {
                        glyph_id += range.len();
                        None
                    }
                })
            }
        };

        glyph_id
            .and_then(|glyph_id| u16::try_from(glyph_id).ok())
            .unwrap_or(0)
    }
}

pub(crate) const STANDARD_ENCODING: [u8; 256] = [
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    1,   // space
    2,   // exclam
    3,   // quotedbl
    4,   // numbersign
    5,   // dollar
    6,   // percent
    7,   // ampersand
    8,   // quoteright
    9,   // parenleft
    10,  // parenright
    11,  // asterisk
    12,  // plus
    13,  // comma
    14,  // hyphen
    15,  // period
    16,  // slash
    17,  // zero
    18,  // one
    19,  // two
    20,  // three
    21,  // four
    22,  // five
    23,  // six
    24,  // seven
    25,  // eight
    26,  // nine
    27,  // colon
    28,  // semicolon
    29,  // less
    30,  // equal
    31,  // greater
    32,  // question
    33,  // at
    34,  // A
    35,  // B
    36,  // C
    37,  // D
    38,  // E
    39,  // F
    40,  // G
    41,  // H
    42,  // I
    43,  // J
    44,  // K
    45,  // L
    46,  // M
    47,  // N
    48,  // O
    49,  // P
    50,  // Q
    51,  // R
    52,  // S
    53,  // T
    54,  // U
    55,  // V
    56,  // W
    57,  // X
    58,  // Y
    59,  // Z
    60,  // bracketleft
    61,  // backslash
    62,  // bracketright
    63,  // asciicircum
    64,  // underscore
    65,  // quoteleft
    66,  // a
    67,  // b
    68,  // c
    69,  // d
    70,  // e
    71,  // f
    72,  // g
    73,  // h
    74,  // i
    75,  // j
    76,  // k
    77,  // l
    78,  // m
    79,  // n
    80,  // o
    81,  // p
    82,  // q
    83,  // r
    84,  // s
    85,  // t
    86,  // u
    87,  // v
    88,  // w
    89,  // x
    90,  // y
    91,  // z
    92,  // braceleft
    93,  // bar
    94,  // braceright
    95,  // asciitilde
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    96,  // exclamdown
    97,  // cent
    98,  // sterling
    99,  // fraction
    100, // yen
    101, // florin
    102, // section
    103, // currency
    104, // quotesingle
    105, // quotedblleft
    106, // guillemotleft
    107, // guilsinglleft
    108, // guilsinglright
    109, // fi
    110, // fl
    0,   // .notdef
    111, // endash
    112, // dagger
    113, // daggerdbl
    114, // periodcentered
    0,   // .notdef
    115, // paragraph
    116, // bullet
    117, // quotesinglbase
    118, // quotedblbase
    119, // quotedblright
    120, // guillemotright
    121, // ellipsis
    122, // perthousand
    0,   // .notdef
    123, // questiondown
    0,   // .notdef
    124, // grave
    125, // acute
    126, // circumflex
    127, // tilde
    128, // macron
    129, // breve
    130, // dotaccent
    131, // dieresis
    0,   // .notdef
    132, // ring
    133, // cedilla
    0,   // .notdef
    134, // hungarumlaut
    135, // ogonek
    136, // caron
    137, // emdash
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    138, // AE
    0,   // .notdef
    139, // ordfeminine
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    140, // Lslash
    141, // Oslash
    142, // OE
    143, // ordmasculine
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    144, // ae
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    145, // dotlessi
    0,   // .notdef
    0,   // .notdef
    146, // lslash
    147, // oslash
    148, // oe
    149, // germandbls
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
];


const EXPERT_ENCODING: [u16; 256] = [
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    1,   // space
    229, // exclamsmall
    230, // Hungarumlautsmall
    0,   // .notdef
    231, // dollaroldstyle
    232, // dollarsuperior
    233, // ampersandsmall
    234, // Acutesmall
    235, // parenleftsuperior
    236, // parenrightsuperior
    237, // twodotenleader
    238, // onedotenleader
    13,  // comma
    14,  // hyphen
    15,  // period
    99,  // fraction
    239, // zerooldstyle
    240, // oneoldstyle
    241, // twooldstyle
    242, // threeoldstyle
    243, // fouroldstyle
    244, // fiveoldstyle
    245, // sixoldstyle
    246, // sevenoldstyle
    247, // eightoldstyle
    248, // nineoldstyle
    27,  // colon
    28,  // semicolon
    249, // commasuperior
    250, // threequartersemdash
    251, // periodsuperior
    252, // questionsmall
    0,   // .notdef
    253, // asuperior
    254, // bsuperior
    255, // centsuperior
    256, // dsuperior
    257, // esuperior
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    258, // isuperior
    0,   // .notdef
    0,   // .notdef
    259, // lsuperior
    260, // msuperior
    261, // nsuperior
    262, // osuperior
    0,   // .notdef
    0,   // .notdef
    263, // rsuperior
    264, // ssuperior
    265, // tsuperior
    0,   // .notdef
    266, // ff
    109, // fi
    110, // fl
    267, // ffi
    268, // ffl
    269, // parenleftinferior
    0,   // .notdef
    270, // parenrightinferior
    271, // Circumflexsmall
    272, // hyphensuperior
    273, // Gravesmall
    274, // Asmall
    275, // Bsmall
    276, // Csmall
    277, // Dsmall
    278, // Esmall
    279, // Fsmall
    280, // Gsmall
    281, // Hsmall
    282, // Ismall
    283, // Jsmall
    284, // Ksmall
    285, // Lsmall
    286, // Msmall
    287, // Nsmall
    288, // Osmall
    289, // Psmall
    290, // Qsmall
    291, // Rsmall
    292, // Ssmall
    293, // Tsmall
    294, // Usmall
    295, // Vsmall
    296, // Wsmall
    297, // Xsmall
    298, // Ysmall
    299, // Zsmall
    300, // colonmonetary
    301, // onefitted
    302, // rupiah
    303, // Tildesmall
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    304, // exclamdownsmall
    305, // centoldstyle
    306, // Lslashsmall
    0,   // .notdef
    0,   // .notdef
    307, // Scaronsmall
    308, // Zcaronsmall
    309, // Dieresissmall
    310, // Brevesmall
    311, // Caronsmall
    0,   // .notdef
    312, // Dotaccentsmall
    0,   // .notdef
    0,   // .notdef
    313, // Macronsmall
    0,   // .notdef
    0,   // .notdef
    314, // figuredash
    315, // hypheninferior
    0,   // .notdef
    0,   // .notdef
    316, // Ogoneksmall
    317, // Ringsmall
    318, // Cedillasmall
    0,   // .notdef
    0,   // .notdef
    0,   // .notdef
    158, // onequarter
    155, // onehalf
    163, // threequarters
    319, // questiondownsmall
    320, // oneeighth
    321, // threeeighths
    322, // fiveeighths
    323, // seveneighths
    324, // onethird
    325, // twothirds
    0,   // .notdef
    0,   // .notdef
    326, // zerosuperior
    150, // onesuperior
    164, // twosuperior
    169, // threesuperior
    327, // foursuperior
    328, // fivesuperior
    329, // sixsuperior
    330, // sevensuperior
    331, // eightsuperior
    332, // ninesuperior
    333, // zeroinferior
    334, // oneinferior
    335, // twoinferior
    336, // threeinferior
    337, // fourinferior
    338, // fiveinferior
    339, // sixinferior
    340, // seveninferior
    341, // eightinferior
    342, // nineinferior
    343, // centinferior
    344, // dollarinferior
    345, // periodinferior
    346, // commainferior
    347, // Agravesmall
    348, // Aacutesmall
    349, // Acircumflexsmall
    350, // Atildesmall
    351, // Adieresissmall
    352, // Aringsmall
    353, // AEsmall
    354, // Ccedillasmall
    355, // Egravesmall
    356, // Eacutesmall
    357, // Ecircumflexsmall
    358, // Edieresissmall
    359, // Igravesmall
    360, // Iacutesmall
    361, // Icircumflexsmall
    362, // Idieresissmall
    363, // Ethsmall
    364, // Ntildesmall
    365, // Ogravesmall
    366, // Oacutesmall
    367, // Ocircumflexsmall
    368, // Otildesmall
    369, // Odieresissmall
    370, // OEsmall
    371, // Oslashsmall
    372, // Ugravesmall
    373, // Uacutesmall
    374, // Ucircumflexsmall
    375, // Udieresissmall
    376, // Yacutesmall
    377, // Thornsmall
    378, // Ydieresissmall
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::read::ReadScope;
    use itertools::Itertools;

    #[test]
    fn test_read_custom_encoding_format0() {
        let data_format0 = [0, 3, 4, 5, 6];
        let mut ctxt = ReadScope::new(&data_format0).ctxt();
        let format0_encoding = ctxt.read::<CustomEncoding<'_>>().unwrap();
        match format0_encoding {
            CustomEncoding::Format0 { codes, supplements } => {
                assert_eq!(codes.iter().collect_vec(), vec![4, 5, 6]);
                assert!(supplements.is_empty());
            }
            _ => panic!("expected CustomEncoding::Format0 got something else"),
        }
    }

    #[test]
    fn test_read_custom_encoding_format1() {
        let data_format1 = [1, 2, 4, 5, 6, 7];
        let mut ctxt = ReadScope::new(&data_format1).ctxt();
        let format1_encoding = ctxt.read::<CustomEncoding<'_>>().unwrap();
        match format1_encoding {
            CustomEncoding::Format1 { ranges, .. } => assert_eq!(
                ranges.iter().collect_vec(),
                vec![
                    Range {
                        first: 4,
                        n_left: 5
                    },
                    Range {
                        first: 6,
                        n_left: 7
                    }
                ]
            ),
            _ => panic!("expected CustomEncoding::Format1 got something else"),
        }
    }

    #[test]
    fn test_read_custom_encoding_supplements() {
        //          format  ncodes  code  nsups  code  __sid__
        let data = [0x80, 1, 5, 1, 65, 0, 7];
        let encoding = ReadScope::new(&data).read::<CustomEncoding<'_>>().unwrap();
        assert_eq!(
            encoding.supplements().iter().collect_vec(),
            vec![Supplement { code: 65, sid: 7 }]
        );
        let charset = Charset::ISOAdobe;
        assert_eq!(encoding.glyph_id(5, &charset), 1);
        assert_eq!(encoding.glyph_id(65, &charset), 7);
        assert_eq!(encoding.glyph_id(66, &charset), 0);
    }

    #[test]
    fn test_read_custom_encoding_bad_format() {
        let mut ctxt = ReadScope::new(&[2, 0]).ctxt();
        assert!(ctxt.read::<CustomEncoding<'_>>().is_err());
    }

    #[test]
    fn test_format1_glyph_id() {
        let data = [1, 2, 65, 2, 97, 1];
        let encoding = ReadScope::new(&data).read::<CustomEncoding<'_>>().unwrap();
        let charset = Charset::ISOAdobe;
        assert_eq!(encoding.glyph_id(65, &charset), 1);
        assert_eq!(encoding.glyph_id(67, &charset), 3);
        assert_eq!(encoding.glyph_id(98, &charset), 5);
        assert_eq!(encoding.glyph_id(68, &charset), 0);
    }

    #[test]
    fn test_predefined_encodings() {
        assert_eq!(Encoding::Standard.glyph_id(b'A', &Charset::ISOAdobe), 34);
        assert_eq!(Encoding::Standard.glyph_id(0, &Charset::ISOAdobe), 0);
        assert_eq!(Encoding::Expert.glyph_id(b' ', &Charset::Expert), 1);
        assert_eq!(Encoding::Expert.glyph_id(b'!', &Charset::Expert), 2);
    }
}
