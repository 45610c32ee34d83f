//! Charsets map glyph ids to SIDs in name-keyed fonts or to CIDs in CID-keyed fonts.
//!
//! Refer to Section 13 of Technical Note #5176.

use std::borrow::Cow;
use std::convert::TryFrom;
use std::iter;

use num_traits as num;

use super::{Range, Strings, SID};
use crate::binary::read::{
    CheckIndex, ReadArray, ReadArrayCow, ReadBinaryDep, ReadCtxt, ReadFrom, ReadUnchecked,
};
use crate::binary::{U16Be, U8};
use crate::error::ParseError;

/// The last SID covered by the ISOAdobe charset.
pub const ISO_ADOBE_LAST_SID: u16 = 228;

#[derive(Clone)]
pub enum Charset<'a> {
    ISOAdobe,
    Expert,
    ExpertSubset,
    Custom(CustomCharset<'a>),
    /// The charset of a CID-keyed font, mapping glyph ids to CIDs.
    Cid(CidCharset<'a>),
}

#[derive(Clone)]
pub enum CidCharset<'a> {
    /// CID equals glyph id for each of the `n_glyphs` glyphs.
    Identity { n_glyphs: usize },
    Custom(CustomCharset<'a>),
}

#[derive(Clone)]
pub enum CustomCharset<'a> {
    Format0 {
        glyphs: ReadArrayCow<'a, U16Be>,
    },
    Format1 {
        ranges: ReadArrayCow<'a, Range<SID, u8>>,
    },
    Format2 {
        ranges: ReadArrayCow<'a, Range<SID, u16>>,
    },
}

impl<'a> Charset<'a> {
    /// Returns the id of the SID (Type 1 font) or CID (CID keyed font) of the name of the supplied glyph
    pub fn id_for_glyph(&self, glyph_id: u16) -> Option<u16> {
        match self {
            // In ISOAdobe glyph ID maps to SID
            Charset::ISOAdobe => {
                if glyph_id <= ISO_ADOBE_LAST_SID {
                    Some(glyph_id)
                } else {
                    None
                }
            }
            Charset::Expert => EXPERT_CHARSET.get(usize::from(glyph_id)).cloned(),
            Charset::ExpertSubset => EXPERT_SUBSET_CHARSET.get(usize::from(glyph_id)).cloned(),
            Charset::Custom(custom) => custom.id_for_glyph(glyph_id),
            Charset::Cid(CidCharset::Identity { n_glyphs }) => {
                if usize::from(glyph_id) < *n_glyphs {
                    Some(glyph_id)
                } else {
                    None
                }
            }
            Charset::Cid(CidCharset::Custom(custom)) => custom.id_for_glyph(glyph_id),
        }
    }

    /// Returns the glyph id with the supplied id, which is a SID or CID depending on the charset.
    fn glyph_for_id(&self, id: u16) -> Option<u16> {
        if id == 0 {
            return Some(0);
        }

        match self {
            Charset::ISOAdobe => {
                if id <= ISO_ADOBE_LAST_SID {
                    Some(id)
                } else {
                    None
                }
            }
            Charset::Expert => position(&EXPERT_CHARSET, id),
            Charset::ExpertSubset => position(&EXPERT_SUBSET_CHARSET, id),
            Charset::Custom(custom) => custom.sid_to_gid(id),
            Charset::Cid(CidCharset::Identity { n_glyphs }) => {
                if usize::from(id) < *n_glyphs {
                    Some(id)
                } else {
                    None
                }
            }
            Charset::Cid(CidCharset::Custom(custom)) => custom.sid_to_gid(id),
        }
    }

    pub fn is_cid(&self) -> bool {
        matches!(self, Charset::Cid(_))
    }

    /// The SID of the glyph's name, or 0 if `glyph_id` is out of range.
    pub fn sid_for_glyph(&self, glyph_id: u16) -> Result<SID, ParseError> {
        self.name_keyed()?;
        Ok(self.id_for_glyph(glyph_id).unwrap_or(0))
    }

    /// The glyph id with name `sid`, or 0 if there is none.
    pub fn glyph_for_sid(&self, sid: SID) -> Result<u16, ParseError> {
        self.name_keyed()?;
        Ok(self.glyph_for_id(sid).unwrap_or(0))
    }

    /// The CID of `glyph_id`, or 0 if it is out of range.
    pub fn cid_for_glyph(&self, glyph_id: u16) -> Result<u16, ParseError> {
        self.cid_keyed()?;
        Ok(self.id_for_glyph(glyph_id).unwrap_or(0))
    }

    /// The glyph id for `cid`, or 0 if the font does not have it.
    pub fn glyph_for_cid(&self, cid: u16) -> Result<u16, ParseError> {
        self.cid_keyed()?;
        Ok(self.glyph_for_id(cid).unwrap_or(0))
    }

    pub fn name_for_glyph<'b>(
        &self,
        glyph_id: u16,
        strings: &Strings<'b>,
    ) -> Result<Option<Cow<'b, str>>, ParseError> {
        self.name_keyed()?;
        Ok(self.id_for_glyph(glyph_id).map(|sid| strings.get(sid)))
    }

    pub fn sid_for_name(&self, name: &str, strings: &Strings<'_>) -> Result<SID, ParseError> {
        self.name_keyed()?;
        Ok(strings.sid_for_name(name).unwrap_or(0))
    }

    /// The glyph id named `name`, or 0 if there is none.
    pub fn glyph_for_name(&self, name: &str, strings: &Strings<'_>) -> Result<u16, ParseError> {
        match self.sid_for_name(name, strings)? {
            0 => Ok(0),
            sid => self.glyph_for_sid(sid),
        }
    }

    fn name_keyed(&self) -> Result<(), ParseError> {
        if self.is_cid() {
            Err(ParseError::WrongKind)
        } else {
            Ok(())
        }
    }

    fn cid_keyed(&self) -> Result<(), ParseError> {
        if self.is_cid() {
            Ok(())
        } else {
            Err(ParseError::WrongKind)
        }
    }
}

fn position(charset: &[u16], sid: SID) -> Option<u16> {
    charset
        .iter()
        .position(|&id| id == sid)
        .and_then(|glyph_id| u16::try_from(glyph_id).ok())
}

impl<'b> ReadBinaryDep for CustomCharset<'b> {
    type Args<'a> = usize;
    type HostType<'a> = CustomCharset<'a>;

    fn read_dep<'a>(
        ctxt: &mut ReadCtxt<'a>,
        n_glyphs: usize,
    ) -> Result<Self::HostType<'a>, ParseError> {
        // (There is one less element in the charset than nGlyphs because the .notdef glyph name is omitted.)
        let n_glyphs = n_glyphs.checked_sub(1).ok_or(ParseError::BadValue)?;
        match ctxt.read::<U8>()? {
            0 => {
                // The number of glyphs (nGlyphs) is the value of the count field in the
                // CharStrings INDEX.
                let glyphs = ctxt.read_array::<U16Be>(n_glyphs)?;
                Ok(CustomCharset::Format0 {
                    glyphs: ReadArrayCow::Borrowed(glyphs),
                })
            }
            1 => {
                let ranges = read_range_array(ctxt, n_glyphs)?;
                Ok(CustomCharset::Format1 {
                    ranges: ReadArrayCow::Borrowed(ranges),
                })
            }
            2 => {
                let ranges = read_range_array(ctxt, n_glyphs)?;
                Ok(CustomCharset::Format2 {
                    ranges: ReadArrayCow::Borrowed(ranges),
                })
            }
            _ => Err(ParseError::BadValue),
        }
    }
}

impl<'a> CustomCharset<'a> {
    pub fn iter(&'a self) -> Box<dyn Iterator<Item = u16> + 'a> {
        let notdef = iter::once(0);
        match &self {
            CustomCharset::Format0 { glyphs } => Box::new(notdef.chain(glyphs.iter())),
            CustomCharset::Format1 { ranges } => {
                Box::new(notdef.chain(ranges.iter().flat_map(|range| range.iter())))
            }
            CustomCharset::Format2 { ranges } => {
                Box::new(notdef.chain(ranges.iter().flat_map(|range| range.iter())))
            }
        }
    }

    /// Returns the SID (Type 1 font) or CID (CID keyed font) of the name of the supplied glyph
    pub fn id_for_glyph(&self, glyph_id: u16) -> Option<u16> {
        // Section 11 of Technical Note #5176:
        // By definition the first glyph (GID 0) is “.notdef” and must be present in all fonts.
        // Since this is always the case, it is not necessary to represent either the encoding
        // (unencoded) or name (.notdef) for GID 0. Consequently, taking advantage of this
        // optimization, the encoding and charset arrays always begin with GID 1.
        if glyph_id == 0 {
            return Some(0);
        }

        match self {
            CustomCharset::Format0 { glyphs } => {
                let index = usize::from(glyph_id - 1);
                glyphs
                    .check_index(index)
                    .ok()
                    .and_then(|_| glyphs.get_item(index))
            }
            CustomCharset::Format1 { ranges } => Self::id_for_glyph_in_ranges(ranges, glyph_id),
            CustomCharset::Format2 { ranges } => Self::id_for_glyph_in_ranges(ranges, glyph_id),
        }
    }

    /// Returns the glyph id of the supplied SID or CID.
    pub fn sid_to_gid(&self, sid: SID) -> Option<u16> {
        if sid == 0 {
            return Some(0);
        }

        match self {
            CustomCharset::Format0 { glyphs: array } => {
                // First glyph is omitted, so we have to add 1.
                array
                    .into_iter()
                    .position(|n| n == sid)
                    .and_then(|n| u16::try_from(n + 1).ok())
            }
            CustomCharset::Format1 { ranges } => Self::glyph_id_for_sid_in_ranges(ranges, sid),
            CustomCharset::Format2 { ranges } => Self::glyph_id_for_sid_in_ranges(ranges, sid),
        }
    }

    fn glyph_id_for_sid_in_ranges<F, N>(
        ranges: &ReadArrayCow<'a, Range<F, N>>,
        sid: SID,
    ) -> Option<u16>
    where
        F: num::Unsigned + Copy,
        N: num::Unsigned + Copy,
        u32: From<N> + From<F>,
        Range<F, N>: ReadFrom,
    {
        let sid = u32::from(sid);
        let mut glyph_id = 1;
        for range in ranges.iter() {
            let first = u32::from(range.first);
            let last = first + u32::from(range.n_left);
            if first <= sid && sid <= last {
                return u16::try_from(glyph_id + sid - first).ok();
            }

            glyph_id += u32::from(range.n_left) + 1;
        }

        None
    }

    fn id_for_glyph_in_ranges<F, N>(
        ranges: &ReadArrayCow<'a, Range<F, N>>,
        glyph_id: u16,
    ) -> Option<u16>
    where
        F: num::Unsigned + Copy,
        N: num::Unsigned + Copy,
        usize: From<N> + From<F>,
        Range<F, N>: ReadFrom,
        <Range<F, N> as ReadUnchecked>::HostType: Copy,
    {
        let glyph_id = usize::from(glyph_id);

        ranges
            .iter()
            .scan(0usize, |glyphs_covered, range| {
                *glyphs_covered += range.len();
                Some((*glyphs_covered, range))
            })
            .find(|(glyphs_covered, _range)| glyph_id <= *glyphs_covered)
            .and_then(|(glyphs_covered, range)| {
                u16::try_from(
                    usize::from(range.first) + (glyph_id - (glyphs_covered - range.len()) - 1),
                )
                .ok()
            })
    }
}

fn read_range_array<'a, F, N>(
    ctxt: &mut ReadCtxt<'a>,
    n_glyphs: usize,
) -> Result<ReadArray<'a, Range<F, N>>, ParseError>
where
    Range<F, N>: ReadFrom,
    usize: From<N>,
    N: num::Unsigned + Copy,
{
    let mut peek = ctxt.scope().ctxt();
    let mut range_count = 0;
    let mut glyphs_covered = 0;
    while glyphs_covered < n_glyphs {
        let range = peek.read::<Range<F, N>>()?;
        range_count += 1;
        glyphs_covered += range.len();
    }

    ctxt.read_array::<Range<F, N>>(range_count)
}

const EXPERT_CHARSET: [u16; 166] = [
    0,   // .notdef
    1,   // space
    229, // exclamsmall
    230, // Hungarumlautsmall
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
    253, // asuperior
    254, // bsuperior
    255, // centsuperior
    256, // dsuperior
    257, // esuperior
    258, // isuperior
    259, // lsuperior
    260, // msuperior
    261, // nsuperior
    262, // osuperior
    263, // rsuperior
    264, // ssuperior
    265, // tsuperior
    266, // ff
    109, // fi
    110, // fl
    267, // ffi
    268, // ffl
    269, // parenleftinferior
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
    304, // exclamdownsmall
    305, // centoldstyle
    306, // Lslashsmall
    307, // Scaronsmall
    308, // Zcaronsmall
    309, // Dieresissmall
    310, // Brevesmall
    311, // Caronsmall
    312, // Dotaccentsmall
    313, // Macronsmall
    314, // figuredash
    315, // hypheninferior
    316, // Ogoneksmall
    317, // Ringsmall
    318, // Cedillasmall
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

const EXPERT_SUBSET_CHARSET: [u16; 87] = [
    0,   // .notdef
    1,   // space
    231, // dollaroldstyle
    232, // dollarsuperior
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
    253, // asuperior
    254, // bsuperior
    255, // centsuperior
    256, // dsuperior
    257, // esuperior
    258, // isuperior
    259, // lsuperior
    260, // msuperior
    261, // nsuperior
    262, // osuperior
    263, // rsuperior
    264, // ssuperior
    265, // tsuperior
    266, // ff
    109, // fi
    110, // fl
    267, // ffi
    268, // ffl
    269, // parenleftinferior
    270, // parenrightinferior
    272, // hyphensuperior
    300, // colonmonetary
    301, // onefitted
    302, // rupiah
    305, // centoldstyle
    314, // figuredash
    315, // hypheninferior
    158, // onequarter
    155, // onehalf
    163, // threequarters
    320, // oneeighth
    321, // threeeighths
    322, // fiveeighths
    323, // seveneighths
    324, // onethird
    325, // twothirds
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
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::read::ReadScope;
    use crate::cff::Index;
    use itertools::Itertools;

    #[test]
    fn test_read_custom_charset_format0() {
        let n_glyphs = 2;
        let data_format0 = [0, 0xAA, 0xBB];
        let mut ctxt = ReadScope::new(&data_format0).ctxt();
        let format0_charset = ctxt.read_dep::<CustomCharset<'_>>(n_glyphs).unwrap();
        match format0_charset {
            CustomCharset::Format0 { glyphs } => {
                assert_eq!(glyphs.iter().collect_vec(), vec![0xAABB])
            }
            _ => panic!("expected CustomCharset::Format0 got something else"),
        }
    }

    #[test]
    fn test_read_custom_charset_format1() {
        let n_glyphs = 5;
        let data_format1 = [1, 0, 1, 3];
        let mut ctxt = ReadScope::new(&data_format1).ctxt();
        let format1_charset = ctxt.read_dep::<CustomCharset<'_>>(n_glyphs).unwrap();
        match format1_charset {
            CustomCharset::Format1 { ranges } => assert_eq!(
                ranges.iter().collect_vec(),
                vec![Range {
                    first: 1,
                    n_left: 3
                },]
            ),
            _ => panic!("expected CustomCharset::Format1 got something else"),
        }
    }

    #[test]
    fn test_read_custom_charset_format2() {
        let n_glyphs = 5;
        let data_format2 = [2, 0, 1, 0, 3];
        let mut ctxt = ReadScope::new(&data_format2).ctxt();
        let format2_charset = ctxt.read_dep::<CustomCharset<'_>>(n_glyphs).unwrap();
        match format2_charset {
            CustomCharset::Format2 { ranges } => assert_eq!(
                ranges.iter().collect_vec(),
                vec![Range {
                    first: 1,
                    n_left: 3
                },]
            ),
            _ => panic!("expected CustomCharset::Format2 got something else"),
        }
    }

    #[test]
    fn test_read_custom_charset_bad_format() {
        let mut ctxt = ReadScope::new(&[3, 0, 1]).ctxt();
        assert!(ctxt.read_dep::<CustomCharset<'_>>(2).is_err());
    }

    #[test]
    fn test_charset_id_for_glyph_pre_defined_charsets() {
        assert_eq!(Charset::ISOAdobe.id_for_glyph(2), Some(2));
        assert_eq!(Charset::ISOAdobe.id_for_glyph(300), None);
        assert_eq!(Charset::Expert.id_for_glyph(2), Some(229));
        assert_eq!(Charset::Expert.id_for_glyph(300), None);
        assert_eq!(Charset::ExpertSubset.id_for_glyph(2), Some(231));
        assert_eq!(Charset::ExpertSubset.id_for_glyph(300), None);
    }

    #[test]
    fn test_charset_glyph_for_sid_pre_defined_charsets() {
        assert_eq!(Charset::ISOAdobe.glyph_for_sid(2), Ok(2));
        assert_eq!(Charset::ISOAdobe.glyph_for_sid(300), Ok(0));
        assert_eq!(Charset::Expert.glyph_for_sid(229), Ok(2));
        assert_eq!(Charset::ExpertSubset.glyph_for_sid(231), Ok(2));
        assert_eq!(Charset::ExpertSubset.glyph_for_sid(7), Ok(0));
    }

    #[test]
    fn test_custom_charset_id_for_glyph_format0() {
        let glyph_sids = ReadArrayCow::Owned(vec![1, 2, 3]);
        let charset = CustomCharset::Format0 { glyphs: glyph_sids };
        // glpyh id 0 is .notdef and is implicitly encoded
        assert_eq!(charset.id_for_glyph(0), Some(0));
        assert_eq!(charset.id_for_glyph(1), Some(1));
        assert_eq!(charset.id_for_glyph(4), None);
        assert_eq!(charset.sid_to_gid(3), Some(3));
        assert_eq!(charset.sid_to_gid(4), None);
    }

    #[test]
    fn test_custom_charset_id_for_glyph_format1() {
        let ranges = ReadArrayCow::Owned(vec![Range {
            first: 34,
            n_left: 5,
        }]);
        let charset = CustomCharset::Format1 { ranges };
        // glpyh id 0 is .notdef and is implicitly encoded
        assert_eq!(charset.id_for_glyph(0), Some(0));
        assert_eq!(charset.id_for_glyph(1), Some(34));
        assert_eq!(charset.id_for_glyph(6), Some(39));
        assert_eq!(charset.id_for_glyph(7), None);
        assert_eq!(charset.sid_to_gid(36), Some(3));
        assert_eq!(charset.sid_to_gid(40), None);
    }

    #[test]
    fn test_custom_charset_id_for_glyph_format2() {
        let ranges = ReadArrayCow::Owned(vec![Range {
            first: 34,
            n_left: 5,
        }]);
        let charset = CustomCharset::Format2 { ranges };
        // glpyh id 0 is .notdef and is implicitly encoded
        assert_eq!(charset.id_for_glyph(0), Some(0));
        assert_eq!(charset.id_for_glyph(1), Some(34));
        assert_eq!(charset.id_for_glyph(6), Some(39));
        assert_eq!(charset.id_for_glyph(7), None);
    }

    #[test]
    fn test_arno_custom_charset_ranges() {
        // These ranges are from the ArnoPro-Regular font and are in the same order they are in the
        // font.
        #[rustfmt::skip]
        let ranges = ReadArrayCow::Owned(vec![
            Range { first: 1, n_left: 107, },
            Range { first: 111, n_left: 38, },
            Range { first: 151, n_left: 12, },
            Range { first: 165, n_left: 3, },
            Range { first: 170, n_left: 58, },
            Range { first: 237, n_left: 1, },
            Range { first: 391, n_left: 0, },
            Range { first: 393, n_left: 0, },
            Range { first: 300, n_left: 0, },
            Range { first: 392, n_left: 0, },
            Range { first: 314, n_left: 0, },
            Range { first: 324, n_left: 1, },
            Range { first: 320, n_left: 3, },
            Range { first: 394, n_left: 2577, },
            Range { first: 109, n_left: 1, },
            Range { first: 2972, n_left: 28, },
            Range { first: 2846, n_left: 768, },
        ]);
        let charset = CustomCharset::Format2 { ranges };
        assert_eq!(charset.id_for_glyph(134), Some(136));
        assert_eq!(charset.id_for_glyph(265), Some(422));
        assert_eq!(charset.id_for_glyph(279), Some(436));
        assert_eq!(charset.sid_to_gid(136), Some(134));
        assert_eq!(charset.sid_to_gid(422), Some(265));
    }

    #[test]
    fn test_custom_charset_iter() {
        #[rustfmt::skip]
        let ranges = ReadArrayCow::Owned(vec![
            Range { first: 111, n_left: 4, },
            Range { first: 1, n_left: 3, },
            Range { first: 2972, n_left: 2, },
        ]);
        let charset = CustomCharset::Format2 { ranges };
        let actual = charset.iter().collect_vec();
        let expected = vec![0, 111, 112, 113, 114, 115, 1, 2, 3, 4, 2972, 2973, 2974];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_cid_charset() {
        let identity = Charset::Cid(CidCharset::Identity { n_glyphs: 3 });
        assert_eq!(identity.cid_for_glyph(2), Ok(2));
        assert_eq!(identity.cid_for_glyph(3), Ok(0));
        assert_eq!(identity.glyph_for_cid(2), Ok(2));
        assert_eq!(identity.glyph_for_cid(3), Ok(0));

        let ranges = ReadArrayCow::Owned(vec![Range {
            first: 1000,
            n_left: 1,
        }]);
        let custom = Charset::Cid(CidCharset::Custom(CustomCharset::Format1 { ranges }));
        assert_eq!(custom.cid_for_glyph(2), Ok(1001));
        assert_eq!(custom.glyph_for_cid(1000), Ok(1));
        assert_eq!(custom.glyph_for_cid(5), Ok(0));
    }

    #[test]
    fn test_wrong_kind() {
        let strings = Strings::new(Index::empty());
        let cid = Charset::Cid(CidCharset::Identity { n_glyphs: 3 });
        assert_eq!(cid.glyph_for_sid(1), Err(ParseError::WrongKind));
        assert_eq!(cid.sid_for_glyph(1), Err(ParseError::WrongKind));
        assert_eq!(
            cid.glyph_for_name("space", &strings),
            Err(ParseError::WrongKind)
        );
        assert_eq!(
            Charset::ISOAdobe.glyph_for_cid(1),
            Err(ParseError::WrongKind)
        );
        assert_eq!(
            Charset::ISOAdobe.cid_for_glyph(1),
            Err(ParseError::WrongKind)
        );
    }

    #[test]
    fn test_glyph_names() {
        let strings = Strings::new(Index::empty());
        let charset = Charset::ISOAdobe;
        assert_eq!(
            charset.name_for_glyph(7, &strings).unwrap().as_deref(),
            Some("ampersand")
        );
        assert_eq!(
            charset.name_for_glyph(0, &strings).unwrap().as_deref(),
            Some(".notdef")
        );
        assert_eq!(charset.name_for_glyph(300, &strings), Ok(None));
        assert_eq!(charset.glyph_for_name("ampersand", &strings), Ok(7));
        assert_eq!(charset.glyph_for_name("missing", &strings), Ok(0));
        assert_eq!(charset.sid_for_glyph(300), Ok(0));
    }
}
