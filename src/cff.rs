//! CFF font handling.
//!
//! Refer to [Technical Note #5176](http://wwwimages.adobe.com/content/dam/Adobe/en/devnet/font/pdfs/5176.CFF.pdf)
//! for more information.

use std::borrow::Cow;
use std::convert::{TryFrom, TryInto};
use std::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder};
use lazy_static::lazy_static;
use log::{debug, warn};
use num_traits as num;
use rustc_hash::FxHashMap;
use tinyvec::{tiny_vec, TinyVec};

use crate::binary::read::{ByteSource, ReadBinary, ReadBinaryDep, ReadCtxt, ReadFrom, ReadScope};
use crate::binary::{U16Be, U8};
use crate::error::ParseError;
use crate::tables;

pub mod charset;
pub mod charstring;
pub mod encoding;
pub mod fd_select;
pub mod outline;

pub use charset::{Charset, CidCharset, CustomCharset};
pub use charstring::{CharstringType, CommandKey, Token, Type1Op, Type2Op};
pub use encoding::{CustomEncoding, Encoding, Supplement};
pub use fd_select::FDSelect;
pub use outline::{Glyph, GlyphPath, PathCommand};

use outline::GlyphCache;

// CFF Spec: An operator may be preceded by up to a maximum of 48 operands.
pub const MAX_OPERANDS: usize = 48;
const END_OF_FLOAT_FLAG: u8 = 0xf;

const OPERAND_ZERO: [Operand; 1] = [Operand::Integer(0)];
const OFFSET_ZERO: [Operand; 1] = [Operand::Offset(0)];
const DEFAULT_UNDERLINE_POSITION: [Operand; 1] = [Operand::Integer(-100)];
const DEFAULT_UNDERLINE_THICKNESS: [Operand; 1] = [Operand::Integer(50)];
const DEFAULT_CHARSTRING_TYPE: [Operand; 1] = [Operand::Integer(2)];
lazy_static! {
    static ref DEFAULT_FONT_MATRIX: [Operand; 6] = {
        let real_0_001 = Operand::Real(Real(tiny_vec![0x0a, 0x00, 0x1f])); // 0.001
        [
            real_0_001.clone(),
            Operand::Integer(0),
            Operand::Integer(0),
            real_0_001,
            Operand::Integer(0),
            Operand::Integer(0),
        ]
    };
}
const DEFAULT_BBOX: [Operand; 4] = [
    Operand::Integer(0),
    Operand::Integer(0),
    Operand::Integer(0),
    Operand::Integer(0),
];
const DEFAULT_CID_COUNT: [Operand; 1] = [Operand::Integer(8720)];
const DEFAULT_BLUE_SHIFT: [Operand; 1] = [Operand::Integer(7)];
const DEFAULT_BLUE_FUZZ: [Operand; 1] = [Operand::Integer(1)];
lazy_static! {
    static ref DEFAULT_BLUE_SCALE: [Operand; 1] =
        [Operand::Real(Real(tiny_vec![0x0a, 0x03, 0x96, 0x25, 0xff]))]; // 0.039625
    static ref DEFAULT_EXPANSION_FACTOR: [Operand; 1] =
        [Operand::Real(Real(tiny_vec![0x0a, 0x06, 0xff]))]; // 0.06
    static ref STANDARD_STRING_SIDS: FxHashMap<&'static str, SID> = STANDARD_STRINGS
        .iter()
        .enumerate()
        .map(|(sid, string)| (*string, sid as SID))
        .collect();
}

/// The FontMatrix used when a font does not specify one.
pub const DEFAULT_FONT_MATRIX_VALUES: [f64; 6] = [0.001, 0.0, 0.0, 0.001, 0.0, 0.0];

/// A string id in the font
pub type SID = u16;

/// Top level representation of a CFF font file, typically read from a CFF OpenType table.
///
/// Refer to Technical Note #5176
pub struct CFF<'a> {
    pub header: Header,
    pub name_index: Index<'a>,
    pub string_index: Index<'a>,
    pub global_subr_index: Index<'a>,
    pub fonts: Vec<Font<'a>>,
    data: &'a [u8],
}

/// CFF Font Header described in Section 6 of Technical Note #5176
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub major: u8,
    pub minor: u8,
    pub hdr_size: u8,
    pub off_size: u8,
}

/// A CFF INDEX described in Section 5 of Technical Note #5176
#[derive(Clone)]
pub struct Index<'a> {
    pub count: usize,
    off_size: u8,
    offset_array: &'a [u8],
    data_array: &'a [u8],
}

/// SID to string lookup over the standard strings and a font's String INDEX.
#[derive(Clone)]
pub struct Strings<'a> {
    index: Index<'a>,
}

/// A single font within a CFF file
///
/// Glyph outlines are decoded on demand and cached per glyph id; see the methods in
/// [outline](crate::cff::outline).
pub struct Font<'a> {
    pub name: Cow<'a, str>,
    pub top_dict: TopDict,
    pub char_strings_index: Index<'a>,
    pub charset: Charset<'a>,
    pub data: CFFVariant<'a>,
    /// The effective FontMatrix, including any Font DICT matrix of a CID-keyed font.
    pub font_matrix: [f64; 6],
    pub charstring_type: CharstringType,
    global_subr_index: Index<'a>,
    strings: Strings<'a>,
    cache: GlyphCache,
}

/// A list of errors that can occur when interpreting CFF CharStrings.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum CFFError {
    ParseError(ParseError),
    InvalidOperator,
    NestingLimitReached,
    ArgumentsStackLimitReached,
    InvalidArgumentsStackLength,
    InvalidSubroutineIndex,
    InvalidSeacCode,
}

pub enum CFFVariant<'a> {
    CID(CIDData<'a>),
    Type1(Type1Data<'a>),
}

pub struct CIDData<'a> {
    pub registry: SID,
    pub ordering: SID,
    pub supplement: i32,
    pub font_dict_index: Index<'a>,
    pub font_dicts: Vec<FontDict>,
    pub private_dicts: Vec<PrivateDict>,
    /// An optional local subroutine index per Private DICT.
    pub local_subr_indices: Vec<Option<Index<'a>>>,
    pub fd_select: FDSelect<'a>,
}

pub struct Type1Data<'a> {
    pub encoding: Encoding<'a>,
    pub private_dict: PrivateDict,
    pub local_subr_index: Option<Index<'a>>,
}

/// Registry, Ordering and Supplement of a CID-keyed font.
#[derive(Clone, Debug, PartialEq)]
pub struct Ros {
    pub registry: String,
    pub ordering: String,
    pub supplement: i32,
}

/// Descriptive values from the Top DICT with SIDs resolved to strings.
#[derive(Clone, Debug, PartialEq)]
pub struct FontInfo {
    pub name: String,
    pub version: Option<String>,
    pub notice: Option<String>,
    pub copyright: Option<String>,
    pub full_name: Option<String>,
    pub family_name: Option<String>,
    pub weight: Option<String>,
    pub is_fixed_pitch: bool,
    pub italic_angle: f64,
    pub underline_position: f64,
    pub underline_thickness: f64,
    pub font_bbox: [f64; 4],
    pub font_matrix: [f64; 6],
    pub charstring_type: i32,
    pub ros: Option<Ros>,
}

/// A Range from `first` to `first + n_left`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Range<F, N> {
    pub first: F,
    pub n_left: N,
}

/// A CFF DICT described in Section 4 of Technical Note #5176
#[derive(Debug, PartialEq, Clone)]
pub struct Dict<T>
where
    T: DictDefault,
{
    dict: Vec<(Operator, Vec<Operand>)>,
    default: PhantomData<T>,
}

/// The default values of a DICT
pub trait DictDefault {
    /// Returns the default operand(s) if any for the supplied `op`.
    fn default(op: Operator) -> Option<&'static [Operand]>;
}

#[derive(Debug, PartialEq, Clone)]
pub struct TopDictDefault;

#[derive(Debug, PartialEq, Clone)]
pub struct FontDictDefault;

#[derive(Debug, PartialEq, Clone)]
pub struct PrivateDictDefault;

pub type TopDict = Dict<TopDictDefault>;

pub type FontDict = Dict<FontDictDefault>;

pub type PrivateDict = Dict<PrivateDictDefault>;

/// CFF DICT operator
#[derive(Debug, PartialEq)]
enum Op {
    Operator(Operator),
    Operand(Operand),
    /// A well formed operator key with no known meaning.
    Unknown(u16),
    /// One of the reserved bytes 22–27, 31 or 255.
    Reserved(u8),
}

/// CFF operand to an operator
#[derive(Debug, PartialEq, Clone)]
pub enum Operand {
    Integer(i32),
    Offset(i32),
    Real(Real),
}

// On a corpus of 23945 CFF fonts real values were encountered as follows:
//     572 2 bytes
//     776 3 bytes
//    1602 4 bytes
//   14037 5 bytes
//    3491 6 bytes
//      36 7 bytes
// Using 7 bytes for the tiny vec covers all these, fits in a register on 64-bit systems,
// allows Operand to be 8 bytes on 64-bit systems, and is considerably smaller than the 24 bytes
// used by Vec.

/// A real number
///
/// To parse the value into `f64` use the `TryFrom`/`TryInto` impl.
#[derive(Debug, PartialEq, Clone)]
pub struct Real(TinyVec<[u8; 7]>);

#[repr(u16)]
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Operator {
    Version = 0,
    Notice = 1,
    FullName = 2,
    FamilyName = 3,
    Weight = 4,
    FontBBox = 5,
    BlueValues = 6,
    OtherBlues = 7,
    FamilyBlues = 8,
    FamilyOtherBlues = 9,
    StdHW = 10,
    StdVW = 11,
    UniqueID = 13,
    XUID = 14,
    Charset = 15,
    Encoding = 16,
    CharStrings = 17,
    Private = 18,
    Subrs = 19,
    DefaultWidthX = 20,
    NominalWidthX = 21,
    Copyright = op2(0),
    IsFixedPitch = op2(1),
    ItalicAngle = op2(2),
    UnderlinePosition = op2(3),
    UnderlineThickness = op2(4),
    PaintType = op2(5),
    CharstringType = op2(6),
    FontMatrix = op2(7),
    StrokeWidth = op2(8),
    BlueScale = op2(9),
    BlueShift = op2(10),
    BlueFuzz = op2(11),
    StemSnapH = op2(12),
    StemSnapV = op2(13),
    ForceBold = op2(14),
    LanguageGroup = op2(17),
    ExpansionFactor = op2(18),
    InitialRandomSeed = op2(19),
    SyntheticBase = op2(20),
    PostScript = op2(21),
    BaseFontName = op2(22),
    BaseFontBlend = op2(23),
    ROS = op2(30),
    CIDFontVersion = op2(31),
    CIDFontRevision = op2(32),
    CIDFontType = op2(33),
    CIDCount = op2(34),
    UIDBase = op2(35),
    FDArray = op2(36),
    FDSelect = op2(37),
    FontName = op2(38),
}

const fn op2(value: u8) -> u16 {
    (12 << 8) | (value as u16)
}

impl<'b> ReadBinary for CFF<'b> {
    type HostType<'a> = CFF<'a>;

    fn read<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<Self::HostType<'a>, ParseError> {
        // Get a scope that starts at the beginning of the CFF data. This is needed for reading
        // data that is specified as an offset from the start of the data later.
        let scope = ctxt.scope();

        let header = ctxt.read::<Header>()?;
        let name_index = ctxt.read::<Index<'_>>()?;
        let top_dict_index = ctxt.read::<Index<'_>>()?;
        let string_index = ctxt.read::<Index<'_>>()?;
        let global_subr_index = ctxt.read::<Index<'_>>()?;

        if name_index.is_empty() || top_dict_index.is_empty() {
            return Err(ParseError::MissingValue);
        }

        let strings = Strings::new(string_index.clone());
        let mut fonts = Vec::with_capacity(name_index.count);
        for font_index in 0..name_index.count {
            let name = name_index
                .read_object(font_index)
                .map(latin1)
                .ok_or(ParseError::BadIndex)?;
            let top_dict = top_dict_index.read::<TopDict>(font_index)?;
            fonts.push(read_font(
                &scope,
                name,
                top_dict,
                &global_subr_index,
                &strings,
            )?);
        }

        Ok(CFF {
            header,
            name_index,
            string_index,
            global_subr_index,
            fonts,
            data: scope.data(),
        })
    }
}

impl<'a> CFF<'a> {
    /// Parse CFF data held by `source`.
    ///
    /// The data may be a bare CFF program or an OpenType font with a `CFF ` table.
    pub fn read_source<S: ByteSource + ?Sized>(source: &'a S) -> Result<CFF<'a>, ParseError> {
        let scope = tables::cff_table_data(ReadScope::new(source.bytes()))?;
        scope.read::<CFF<'_>>()
    }

    /// The raw CFF program this was parsed from.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Read a string with the given SID
    pub fn read_string(&self, sid: SID) -> Cow<'a, str> {
        Strings::new(self.string_index.clone()).get(sid)
    }
}

fn read_font<'a>(
    scope: &ReadScope<'a>,
    name: Cow<'a, str>,
    top_dict: TopDict,
    global_subr_index: &Index<'a>,
    strings: &Strings<'a>,
) -> Result<Font<'a>, ParseError> {
    if top_dict.get(Operator::SyntheticBase).is_some() {
        return Err(ParseError::NotImplemented);
    }

    // CharStrings index
    let offset = top_dict
        .get_i32(Operator::CharStrings)
        .unwrap_or(Err(ParseError::MissingValue))?;
    let char_strings_index = scope.offset(usize::try_from(offset)?).read::<Index<'_>>()?;
    // Every font has at least the .notdef glyph
    if char_strings_index.is_empty() {
        return Err(ParseError::MissingValue);
    }
    let n_glyphs = char_strings_index.count;

    let charstring_type = top_dict
        .get_i32(Operator::CharstringType)
        .unwrap_or(Ok(2))?;
    let charstring_type =
        CharstringType::try_from(charstring_type).map_err(|_| ParseError::NotImplemented)?;

    let mut font_matrix = top_dict
        .get(Operator::FontMatrix)
        .map(read_matrix)
        .transpose()?;

    // The presence of ROS marks a CID-keyed font
    let is_cid = top_dict.get(Operator::ROS).is_some();
    let data = if is_cid {
        let cid_data = read_cid_data(scope, &top_dict, n_glyphs)?;
        // Some fonts only have a FontMatrix in their first Font DICT
        let fd_matrix = cid_data
            .font_dicts
            .first()
            .and_then(|font_dict| font_dict.get(Operator::FontMatrix))
            .map(read_matrix)
            .transpose()?;
        font_matrix = match (font_matrix, fd_matrix) {
            (Some(top), Some(fd)) => Some(concatenate(&top, &fd)),
            (top, fd) => top.or(fd),
        };
        CFFVariant::CID(cid_data)
    } else {
        let (private_dict, private_dict_offset) = top_dict.read_private_dict(scope)?;
        let local_subr_index = read_local_subr_index(scope, &private_dict, private_dict_offset)?;
        let encoding = read_encoding(scope, &top_dict)?;

        CFFVariant::Type1(Type1Data {
            encoding,
            private_dict,
            local_subr_index,
        })
    };

    let charset = read_charset(scope, &top_dict, n_glyphs, is_cid)?;

    Ok(Font {
        name,
        top_dict,
        cache: GlyphCache::new(n_glyphs),
        char_strings_index,
        charset,
        data,
        font_matrix: font_matrix.unwrap_or(DEFAULT_FONT_MATRIX_VALUES),
        charstring_type,
        global_subr_index: global_subr_index.clone(),
        strings: strings.clone(),
    })
}

fn read_matrix(operands: &[Operand]) -> Result<[f64; 6], ParseError> {
    let values = operands
        .iter()
        .map(Operand::to_f64)
        .collect::<Result<Vec<_>, _>>()?;
    <[f64; 6]>::try_from(values).map_err(|_| ParseError::BadValue)
}

/// Concatenate two 2×3 affine transforms, applying `first` then `second`.
fn concatenate(first: &[f64; 6], second: &[f64; 6]) -> [f64; 6] {
    let [a1, b1, c1, d1, x1, y1] = *first;
    let [a2, b2, c2, d2, x2, y2] = *second;
    [
        a1 * a2 + b1 * c2,
        a1 * b2 + b1 * d2,
        c1 * a2 + d1 * c2,
        c1 * b2 + d1 * d2,
        x1 * a2 + y1 * c2 + x2,
        x1 * b2 + y1 * d2 + y2,
    ]
}

impl<'a> Strings<'a> {
    pub fn new(index: Index<'a>) -> Strings<'a> {
        Strings { index }
    }

    /// The number of valid SIDs: the standard strings followed by the String INDEX.
    pub fn sid_count(&self) -> usize {
        STANDARD_STRINGS.len() + self.index.count
    }

    /// Returns the string for `sid` or `None` if it is out of range.
    pub fn lookup(&self, sid: SID) -> Option<Cow<'a, str>> {
        let sid = usize::from(sid);
        // When the client needs to determine the string that corresponds to a particular SID it
        // performs the following: test if SID is in standard range then fetch from internal table,
        // otherwise, fetch string from the String INDEX using a value of (SID – nStdStrings) as
        // the index
        match STANDARD_STRINGS.get(sid) {
            Some(string) => Some(Cow::Borrowed(string)),
            None => self
                .index
                .read_object(sid - STANDARD_STRINGS.len())
                .map(latin1),
        }
    }

    /// Returns the string for `sid`, or a `SID<n>` placeholder if it is out of range.
    pub fn get(&self, sid: SID) -> Cow<'a, str> {
        self.lookup(sid)
            .unwrap_or_else(|| Cow::Owned(format!("SID{}", sid)))
    }

    /// Find the SID of `name`, preferring the standard strings.
    pub fn sid_for_name(&self, name: &str) -> Option<SID> {
        if let Some(sid) = STANDARD_STRING_SIDS.get(name) {
            return Some(*sid);
        }
        self.index
            .iter()
            .position(|bytes| latin1(bytes) == name)
            .and_then(|index| SID::try_from(index + STANDARD_STRINGS.len()).ok())
    }
}

// CFF strings are ASCII in practice. Anything else is treated as Latin-1.
fn latin1(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) if bytes.is_ascii() => Cow::Borrowed(s),
        _ => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

impl ReadBinary for Header {
    type HostType<'b> = Self;

    fn read(ctxt: &mut ReadCtxt<'_>) -> Result<Self, ParseError> {
        // From section 6 of Technical Note #5176:
        // Implementations reading font set files must include code to check version numbers so
        // that if and when the format and therefore the version number changes, older
        // implementations will reject newer versions gracefully.
        let major = ctxt.read_u8()?;
        ctxt.check_version(major == 1)?;
        let minor = ctxt.read_u8()?;
        let hdr_size = ctxt.read_u8()?;
        let off_size = ctxt.read_u8()?;

        if hdr_size < 4 {
            return Err(ParseError::BadValue);
        }

        if off_size < 1 || off_size > 4 {
            return Err(ParseError::BadValue);
        }

        let _unknown = ctxt.read_slice((hdr_size - 4) as usize)?;

        Ok(Header {
            major,
            minor,
            hdr_size,
            off_size,
        })
    }
}

impl<'b> ReadBinary for Index<'b> {
    type HostType<'a> = Index<'a>;

    fn read<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<Self::HostType<'a>, ParseError> {
        let count = usize::from(ctxt.read_u16be()?);

        if count == 0 {
            return Ok(Index::empty());
        }

        let off_size = ctxt.read_u8()?;
        if off_size < 1 || off_size > 4 {
            return Err(ParseError::BadValue);
        }

        let offset_array_size = (count + 1) * usize::from(off_size);
        let offset_array = ctxt.read_slice(offset_array_size)?;

        // Offsets start at 1, never decrease, and must stay within the data that follows.
        let available = ctxt.scope().data().len();
        let mut last_offset = 1;
        for i in 0..=count {
            let offset = lookup_offset_index(off_size, offset_array, i)
                .ok_or(ParseError::MalformedIndex)?;
            if offset < last_offset || offset - 1 > available {
                return Err(ParseError::MalformedIndex);
            }
            last_offset = offset;
        }

        let data_array = ctxt.read_slice(last_offset - 1)?;

        Ok(Index {
            count,
            off_size,
            offset_array,
            data_array,
        })
    }
}

impl<T> ReadBinary for Dict<T>
where
    T: DictDefault,
{
    type HostType<'b> = Self;

    fn read<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<Self::HostType<'a>, ParseError> {
        let mut dict = Vec::new();
        let mut operands = Vec::new();

        while ctxt.bytes_available() {
            match Op::read(ctxt)? {
                Op::Operator(operator) => {
                    integer_to_offset(operator, &mut operands);
                    dict.push((operator, operands.clone()));
                    operands.clear();
                }
                Op::Operand(operand) => {
                    operands.push(operand);
                    if operands.len() > MAX_OPERANDS {
                        return Err(ParseError::LimitExceeded);
                    }
                }
                Op::Unknown(key) => {
                    debug!("ignoring unknown DICT operator 0x{:04x}", key);
                    operands.clear();
                }
                Op::Reserved(b0) => {
                    warn!("reserved DICT byte {} terminates entry", b0);
                    operands.clear();
                }
            }
        }

        Ok(Dict {
            dict,
            default: PhantomData,
        })
    }
}

// Special case handling for operands that are offsets. This function swaps them from an
// Integer to an Offset.
fn integer_to_offset(operator: Operator, operands: &mut [Operand]) {
    match (operator, &operands) {
        // Encodings 0..=1 indicate predefined encodings and are not offsets
        (Operator::Encoding, [Operand::Integer(offset)]) if *offset > 1 => {
            operands[0] = Operand::Offset(*offset);
        }
        (Operator::Charset, [Operand::Integer(offset)])
        | (Operator::CharStrings, [Operand::Integer(offset)])
        | (Operator::Subrs, [Operand::Integer(offset)])
        | (Operator::FDArray, [Operand::Integer(offset)])
        | (Operator::FDSelect, [Operand::Integer(offset)]) => {
            operands[0] = Operand::Offset(*offset);
        }
        (Operator::Private, [Operand::Integer(length), Operand::Integer(offset)]) => {
            let offset = *offset; // This is a work around an ownership issue
            operands[0] = Operand::Offset(*length);
            operands[1] = Operand::Offset(offset);
        }
        _ => {}
    }
}

impl ReadBinary for Op {
    type HostType<'b> = Self;

    fn read<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<Self, ParseError> {
        let b0 = ctxt.read_u8()?;

        match b0 {
            0..=11 | 13..=21 => ok_operator(u16::from(b0)),
            12 => ok_operator(op2(ctxt.read_u8()?)),
            28 => {
                let num = ctxt.read_i16be()?;
                Ok(Op::Operand(Operand::Integer(i32::from(num))))
            }
            29 => ok_int(ctxt.read_i32be()?),
            30 => ok_real(ctxt.read_until_nibble(END_OF_FLOAT_FLAG)?),
            32..=246 => ok_int(i32::from(b0) - 139),
            247..=250 => {
                let b1 = ctxt.read_u8()?;
                ok_int((i32::from(b0) - 247) * 256 + i32::from(b1) + 108)
            }
            251..=254 => {
                let b1 = ctxt.read_u8()?;
                ok_int(-(i32::from(b0) - 251) * 256 - i32::from(b1) - 108)
            }
            22..=27 | 31 | 255 => Ok(Op::Reserved(b0)),
        }
    }
}

fn ok_operator(value: u16) -> Result<Op, ParseError> {
    Ok(Operator::try_from(value)
        .map(Op::Operator)
        .unwrap_or(Op::Unknown(value)))
}

fn ok_int(num: i32) -> Result<Op, ParseError> {
    Ok(Op::Operand(Operand::Integer(num)))
}

fn ok_real(slice: &[u8]) -> Result<Op, ParseError> {
    Ok(Op::Operand(Operand::Real(Real(TinyVec::from(slice)))))
}

const FLOAT_BUF_LEN: usize = 64;

impl TryFrom<&Real> for f64 {
    type Error = ParseError;

    /// Try to parse this `Real` into an `f64`.
    ///
    /// Follows Table 5 of Technical Note #5176 with the leniency of widely deployed readers:
    /// a repeated exponent is skipped, a missing exponent value reads as 0, the reserved nibble
    /// is ignored and a trailing minus sign is dropped.
    fn try_from(real: &Real) -> Result<Self, Self::Error> {
        let mut buf = String::with_capacity(FLOAT_BUF_LEN);
        let mut exponent_seen = false;
        let mut exponent_missing = false;

        for nibble in real.0.iter().flat_map(|&byte| [byte >> 4, byte & 0xF]) {
            if nibble == END_OF_FLOAT_FLAG {
                break;
            }
            if buf.len() >= FLOAT_BUF_LEN {
                return Err(ParseError::LimitExceeded);
            }
            match nibble {
                0..=9 => {
                    buf.push(char::from(b'0' + nibble));
                    exponent_missing = false;
                }
                0xa => buf.push('.'),
                0xb | 0xc => {
                    if exponent_seen {
                        warn!("duplicate exponent in real number");
                        continue;
                    }
                    exponent_seen = true;
                    exponent_missing = true;
                    buf.push_str(if nibble == 0xb { "E" } else { "E-" });
                }
                0xd => {}
                _ => buf.push('-'),
            }
        }

        if exponent_missing {
            buf.push('0');
        }
        if buf.len() > 1 && buf.ends_with('-') {
            buf.pop();
        }
        if buf.is_empty() || buf == "E-0" {
            return Ok(0.0);
        }

        buf.parse().map_err(|_| ParseError::BadValue)
    }
}

impl ReadFrom for Range<u8, u8> {
    type ReadType = (U8, U8);
    fn read_from((first, n_left): (u8, u8)) -> Self {
        Range { first, n_left }
    }
}

impl ReadFrom for Range<SID, u8> {
    type ReadType = (U16Be, U8);
    fn read_from((first, n_left): (SID, u8)) -> Self {
        Range { first, n_left }
    }
}

impl ReadFrom for Range<SID, u16> {
    type ReadType = (U16Be, U16Be);
    fn read_from((first, n_left): (SID, u16)) -> Self {
        Range { first, n_left }
    }
}

impl<F, N> Range<F, N>
where
    N: num::Unsigned + Copy,
    usize: From<N>,
{
    pub fn len(&self) -> usize {
        usize::from(self.n_left) + 1
    }
}

impl Range<SID, u8> {
    pub fn iter(&self) -> impl Iterator<Item = SID> {
        let last = self.first.saturating_add(SID::from(self.n_left));
        self.first..=last
    }
}

impl Range<SID, u16> {
    pub fn iter(&self) -> impl Iterator<Item = SID> {
        let last = self.first.saturating_add(self.n_left);
        self.first..=last
    }
}

impl<'a> Index<'a> {
    pub fn empty() -> Index<'a> {
        Index {
            count: 0,
            off_size: 1,
            offset_array: &[],
            data_array: &[],
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn read_object(&self, index: usize) -> Option<&'a [u8]> {
        if index < self.count {
            let start = lookup_offset_index(self.off_size, self.offset_array, index)?;
            let end = lookup_offset_index(self.off_size, self.offset_array, index + 1)?;
            self.data_array.get(start.checked_sub(1)?..end.checked_sub(1)?)
        } else {
            None
        }
    }

    pub fn read<T: ReadBinaryDep<Args<'a> = ()>>(
        &self,
        index: usize,
    ) -> Result<T::HostType<'a>, ParseError> {
        let data = self.read_object(index).ok_or(ParseError::BadIndex)?;
        ReadScope::new(data).read_dep::<T>(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        (0..self.count).filter_map(move |i| self.read_object(i))
    }

    /// Returns the size of the data held by this INDEX.
    pub fn data_len(&self) -> usize {
        self.data_array.len()
    }
}

impl DictDefault for TopDictDefault {
    fn default(op: Operator) -> Option<&'static [Operand]> {
        match op {
            Operator::IsFixedPitch => Some(&OPERAND_ZERO),
            Operator::ItalicAngle => Some(&OPERAND_ZERO),
            Operator::UnderlinePosition => Some(&DEFAULT_UNDERLINE_POSITION),
            Operator::UnderlineThickness => Some(&DEFAULT_UNDERLINE_THICKNESS),
            Operator::PaintType => Some(&OPERAND_ZERO),
            Operator::CharstringType => Some(&DEFAULT_CHARSTRING_TYPE),
            Operator::FontMatrix => Some(DEFAULT_FONT_MATRIX.as_ref()),
            Operator::FontBBox => Some(&DEFAULT_BBOX),
            Operator::StrokeWidth => Some(&OPERAND_ZERO),
            Operator::Charset => Some(&OFFSET_ZERO),
            Operator::Encoding => Some(&OFFSET_ZERO),
            Operator::CIDFontVersion => Some(&OPERAND_ZERO),
            Operator::CIDFontRevision => Some(&OPERAND_ZERO),
            Operator::CIDFontType => Some(&OPERAND_ZERO),
            Operator::CIDCount => Some(&DEFAULT_CID_COUNT),
            _ => None,
        }
    }
}

impl DictDefault for FontDictDefault {
    fn default(_op: Operator) -> Option<&'static [Operand]> {
        None
    }
}

impl DictDefault for PrivateDictDefault {
    fn default(op: Operator) -> Option<&'static [Operand]> {
        match op {
            Operator::BlueScale => Some(DEFAULT_BLUE_SCALE.as_ref()),
            Operator::BlueShift => Some(&DEFAULT_BLUE_SHIFT),
            Operator::BlueFuzz => Some(&DEFAULT_BLUE_FUZZ),
            Operator::ForceBold => Some(&OPERAND_ZERO),
            Operator::LanguageGroup => Some(&OPERAND_ZERO),
            Operator::ExpansionFactor => Some(DEFAULT_EXPANSION_FACTOR.as_ref()),
            Operator::InitialRandomSeed => Some(&OPERAND_ZERO),
            Operator::StrokeWidth => Some(&OPERAND_ZERO),
            Operator::DefaultWidthX => Some(&OPERAND_ZERO),
            Operator::NominalWidthX => Some(&OPERAND_ZERO),
            _ => None,
        }
    }
}

impl<'a, T> Dict<T>
where
    T: DictDefault,
{
    pub fn new() -> Self {
        Dict {
            dict: Vec::new(),
            default: PhantomData,
        }
    }

    pub fn get_with_default(&self, key: Operator) -> Option<&[Operand]> {
        self.get(key).or_else(|| T::default(key))
    }

    pub fn get(&self, key: Operator) -> Option<&[Operand]> {
        self.dict.iter().find_map(|(op, args)| {
            if *op == key {
                Some(args.as_slice())
            } else {
                None
            }
        })
    }

    /// Returns the i32 value of this operator if the operands hold a single Integer.
    pub fn get_i32(&self, key: Operator) -> Option<Result<i32, ParseError>> {
        self.get_with_default(key).map(|operands| match operands {
            [Operand::Integer(number)] => Ok(*number),
            [Operand::Offset(number)] => Ok(*number),
            _ => Err(ParseError::BadValue),
        })
    }

    /// Returns the value of this operator if it has a single numeric operand.
    pub fn get_f64(&self, key: Operator) -> Option<Result<f64, ParseError>> {
        self.get_with_default(key).map(|operands| match operands {
            [operand] => operand.to_f64(),
            _ => Err(ParseError::BadValue),
        })
    }

    /// Returns all operands of this operator as numbers.
    pub fn get_f64_array(&self, key: Operator) -> Option<Result<Vec<f64>, ParseError>> {
        self.get_with_default(key)
            .map(|operands| operands.iter().map(Operand::to_f64).collect())
    }

    /// Returns the operands of a delta encoded operator, such as BlueValues, as absolute values.
    pub fn get_delta(&self, key: Operator) -> Option<Result<Vec<f64>, ParseError>> {
        self.get_f64_array(key).map(|values| {
            values.map(|values| {
                values
                    .into_iter()
                    .scan(0.0, |total, value| {
                        *total += value;
                        Some(*total)
                    })
                    .collect()
            })
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Operator, Vec<Operand>)> {
        self.dict.iter()
    }

    /// Returns the first operator of this DICT or `None` if the DICT is empty.
    pub fn first_operator(&self) -> Option<Operator> {
        self.iter().next().map(|(operator, _)| *operator)
    }

    /// Read a PrivateDict from this Dict returning it and its offset within `scope` on success.
    ///
    /// A Private DICT is required, but may be specified as having a length of 0 if there are no
    /// non-default values to be stored.
    pub fn read_private_dict(
        &self,
        scope: &ReadScope<'a>,
    ) -> Result<(PrivateDict, usize), ParseError> {
        let (private_dict_offset, private_dict_length) =
            match self.get_with_default(Operator::Private) {
                Some([Operand::Offset(length), Operand::Offset(offset)]) => {
                    Ok((usize::try_from(*offset)?, usize::try_from(*length)?))
                }
                Some(_) => Err(ParseError::BadValue),
                None => Err(ParseError::MissingValue),
            }?;
        scope
            .offset_length(private_dict_offset, private_dict_length)?
            .read::<PrivateDict>()
            .map(|dict| (dict, private_dict_offset))
    }

    pub fn len(&self) -> usize {
        self.dict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }
}

impl<T: DictDefault> Default for Dict<T> {
    fn default() -> Self {
        Dict::new()
    }
}

impl Operator {
    /// The name of this operator as used in Technical Note #5176.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Version => "version",
            Operator::Notice => "Notice",
            Operator::FullName => "FullName",
            Operator::FamilyName => "FamilyName",
            Operator::Weight => "Weight",
            Operator::FontBBox => "FontBBox",
            Operator::BlueValues => "BlueValues",
            Operator::OtherBlues => "OtherBlues",
            Operator::FamilyBlues => "FamilyBlues",
            Operator::FamilyOtherBlues => "FamilyOtherBlues",
            Operator::StdHW => "StdHW",
            Operator::StdVW => "StdVW",
            Operator::UniqueID => "UniqueID",
            Operator::XUID => "XUID",
            Operator::Charset => "charset",
            Operator::Encoding => "Encoding",
            Operator::CharStrings => "CharStrings",
            Operator::Private => "Private",
            Operator::Subrs => "Subrs",
            Operator::DefaultWidthX => "defaultWidthX",
            Operator::NominalWidthX => "nominalWidthX",
            Operator::Copyright => "Copyright",
            Operator::IsFixedPitch => "isFixedPitch",
            Operator::ItalicAngle => "ItalicAngle",
            Operator::UnderlinePosition => "UnderlinePosition",
            Operator::UnderlineThickness => "UnderlineThickness",
            Operator::PaintType => "PaintType",
            Operator::CharstringType => "CharstringType",
            Operator::FontMatrix => "FontMatrix",
            Operator::StrokeWidth => "StrokeWidth",
            Operator::BlueScale => "BlueScale",
            Operator::BlueShift => "BlueShift",
            Operator::BlueFuzz => "BlueFuzz",
            Operator::StemSnapH => "StemSnapH",
            Operator::StemSnapV => "StemSnapV",
            Operator::ForceBold => "ForceBold",
            Operator::LanguageGroup => "LanguageGroup",
            Operator::ExpansionFactor => "ExpansionFactor",
            Operator::InitialRandomSeed => "initialRandomSeed",
            Operator::SyntheticBase => "SyntheticBase",
            Operator::PostScript => "PostScript",
            Operator::BaseFontName => "BaseFontName",
            Operator::BaseFontBlend => "BaseFontBlend",
            Operator::ROS => "ROS",
            Operator::CIDFontVersion => "CIDFontVersion",
            Operator::CIDFontRevision => "CIDFontRevision",
            Operator::CIDFontType => "CIDFontType",
            Operator::CIDCount => "CIDCount",
            Operator::UIDBase => "UIDBase",
            Operator::FDArray => "FDArray",
            Operator::FDSelect => "FDSelect",
            Operator::FontName => "FontName",
        }
    }
}

impl TryFrom<u16> for Operator {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if (value & 0xFF00) == (12 << 8) {
            match value as u8 {
                0 => Ok(Operator::Copyright),
                1 => Ok(Operator::IsFixedPitch),
                2 => Ok(Operator::ItalicAngle),
                3 => Ok(Operator::UnderlinePosition),
                4 => Ok(Operator::UnderlineThickness),
                5 => Ok(Operator::PaintType),
                6 => Ok(Operator::CharstringType),
                7 => Ok(Operator::FontMatrix),
                8 => Ok(Operator::StrokeWidth),
                9 => Ok(Operator::BlueScale),
                10 => Ok(Operator::BlueShift),
                11 => Ok(Operator::BlueFuzz),
                12 => Ok(Operator::StemSnapH),
                13 => Ok(Operator::StemSnapV),
                14 => Ok(Operator::ForceBold),
                17 => Ok(Operator::LanguageGroup),
                18 => Ok(Operator::ExpansionFactor),
                19 => Ok(Operator::InitialRandomSeed),
                20 => Ok(Operator::SyntheticBase),
                21 => Ok(Operator::PostScript),
                22 => Ok(Operator::BaseFontName),
                23 => Ok(Operator::BaseFontBlend),
                30 => Ok(Operator::ROS),
                31 => Ok(Operator::CIDFontVersion),
                32 => Ok(Operator::CIDFontRevision),
                33 => Ok(Operator::CIDFontType),
                34 => Ok(Operator::CIDCount),
                35 => Ok(Operator::UIDBase),
                36 => Ok(Operator::FDArray),
                37 => Ok(Operator::FDSelect),
                38 => Ok(Operator::FontName),
                _ => Err(ParseError::BadValue),
            }
        } else {
            match value {
                0 => Ok(Operator::Version),
                1 => Ok(Operator::Notice),
                2 => Ok(Operator::FullName),
                3 => Ok(Operator::FamilyName),
                4 => Ok(Operator::Weight),
                5 => Ok(Operator::FontBBox),
                6 => Ok(Operator::BlueValues),
                7 => Ok(Operator::OtherBlues),
                8 => Ok(Operator::FamilyBlues),
                9 => Ok(Operator::FamilyOtherBlues),
                10 => Ok(Operator::StdHW),
                11 => Ok(Operator::StdVW),
                13 => Ok(Operator::UniqueID),
                14 => Ok(Operator::XUID),
                15 => Ok(Operator::Charset),
                16 => Ok(Operator::Encoding),
                17 => Ok(Operator::CharStrings),
                18 => Ok(Operator::Private),
                19 => Ok(Operator::Subrs),
                20 => Ok(Operator::DefaultWidthX),
                21 => Ok(Operator::NominalWidthX),
                _ => Err(ParseError::BadValue),
            }
        }
    }
}

impl Operand {
    pub fn is_offset(&self) -> bool {
        matches!(self, Operand::Offset(_))
    }

    pub fn to_f64(&self) -> Result<f64, ParseError> {
        match self {
            Operand::Integer(number) | Operand::Offset(number) => Ok(f64::from(*number)),
            Operand::Real(real) => real.try_into(),
        }
    }
}

impl<'a> CIDData<'a> {
    pub fn font_dict(&self, index: usize) -> Result<FontDict, ParseError> {
        self.font_dicts.get(index).cloned().ok_or(ParseError::BadIndex)
    }
}

impl<'a> Font<'a> {
    pub fn is_cid_keyed(&self) -> bool {
        match self.data {
            CFFVariant::CID(_) => true,
            CFFVariant::Type1(_) => false,
        }
    }

    pub fn num_glyphs(&self) -> usize {
        self.char_strings_index.count
    }

    /// String lookup for this font.
    pub fn strings(&self) -> &Strings<'a> {
        &self.strings
    }

    pub fn global_subr_index(&self) -> &Index<'a> {
        &self.global_subr_index
    }

    /// Descriptive information from the Top DICT.
    pub fn info(&self) -> Result<FontInfo, ParseError> {
        let top_dict = &self.top_dict;
        let ros = match &self.data {
            CFFVariant::CID(cid) => Some(Ros {
                registry: self.strings.get(cid.registry).into_owned(),
                ordering: self.strings.get(cid.ordering).into_owned(),
                supplement: cid.supplement,
            }),
            CFFVariant::Type1(_) => None,
        };
        let font_bbox = top_dict
            .get_f64_array(Operator::FontBBox)
            .unwrap_or(Err(ParseError::MissingValue))?;

        Ok(FontInfo {
            name: self.name.to_string(),
            version: self.dict_string(top_dict, Operator::Version)?,
            notice: self.dict_string(top_dict, Operator::Notice)?,
            copyright: self.dict_string(top_dict, Operator::Copyright)?,
            full_name: self.dict_string(top_dict, Operator::FullName)?,
            family_name: self.dict_string(top_dict, Operator::FamilyName)?,
            weight: self.dict_string(top_dict, Operator::Weight)?,
            is_fixed_pitch: top_dict.get_i32(Operator::IsFixedPitch).unwrap_or(Ok(0))? != 0,
            italic_angle: top_dict.get_f64(Operator::ItalicAngle).unwrap_or(Ok(0.0))?,
            underline_position: top_dict
                .get_f64(Operator::UnderlinePosition)
                .unwrap_or(Ok(-100.0))?,
            underline_thickness: top_dict
                .get_f64(Operator::UnderlineThickness)
                .unwrap_or(Ok(50.0))?,
            font_bbox: <[f64; 4]>::try_from(font_bbox).map_err(|_| ParseError::BadValue)?,
            font_matrix: self.font_matrix,
            charstring_type: top_dict.get_i32(Operator::CharstringType).unwrap_or(Ok(2))?,
            ros,
        })
    }

    /// The FontName of Font DICT `fd` in a CID-keyed font.
    pub fn font_name(&self, fd: usize) -> Result<Option<Cow<'a, str>>, ParseError> {
        match &self.data {
            CFFVariant::CID(cid) => {
                let font_dict = cid.font_dicts.get(fd).ok_or(ParseError::BadIndex)?;
                self.dict_sid(font_dict, Operator::FontName)
                    .map(|sid| sid.map(|sid| self.strings.get(sid)))
            }
            CFFVariant::Type1(_) => Err(ParseError::WrongKind),
        }
    }

    /// Look up the glyph id of a glyph by name. Returns 0 if there is no such glyph.
    pub fn glyph_id_for_name(&self, name: &str) -> Result<u16, ParseError> {
        self.charset.glyph_for_name(name, &self.strings)
    }

    /// Look up the glyph id of a CID. Returns 0 if there is no such glyph.
    pub fn glyph_id_for_cid(&self, cid: u16) -> Result<u16, ParseError> {
        self.charset.glyph_for_cid(cid)
    }

    /// Map a character code through the font's encoding. Returns 0 if the code is unmapped.
    pub fn glyph_id_for_code(&self, code: u8) -> Result<u16, ParseError> {
        match &self.data {
            CFFVariant::Type1(type1) => Ok(type1.encoding.glyph_id(code, &self.charset)),
            CFFVariant::CID(_) => Err(ParseError::WrongKind),
        }
    }

    pub fn glyph_name(&self, glyph_id: u16) -> Result<Option<Cow<'a, str>>, ParseError> {
        self.charset.name_for_glyph(glyph_id, &self.strings)
    }

    /// Returns `true` if the font has a glyph named `name` other than `.notdef`.
    pub fn has_glyph(&self, name: &str) -> bool {
        matches!(self.glyph_id_for_name(name), Ok(glyph_id) if glyph_id != 0)
    }

    /// The Private DICT and local subroutines that apply to `glyph_id`.
    ///
    /// A CID-keyed glyph that FDSelect does not map to a Font DICT has neither.
    pub fn private_data(&self, glyph_id: u16) -> (Option<&PrivateDict>, Option<&Index<'a>>) {
        match &self.data {
            CFFVariant::Type1(type1) => {
                (Some(&type1.private_dict), type1.local_subr_index.as_ref())
            }
            CFFVariant::CID(cid) => match cid.fd_select.font_dict_index(glyph_id) {
                Some(fd) => {
                    let fd = usize::from(fd);
                    (
                        cid.private_dicts.get(fd),
                        cid.local_subr_indices.get(fd).and_then(Option::as_ref),
                    )
                }
                None => (None, None),
            },
        }
    }

    fn dict_sid<T: DictDefault>(
        &self,
        dict: &Dict<T>,
        op: Operator,
    ) -> Result<Option<SID>, ParseError> {
        match dict.get(op) {
            Some([Operand::Integer(sid)]) => Ok(Some(SID::try_from(*sid)?)),
            Some(_) => Err(ParseError::BadValue),
            None => Ok(None),
        }
    }

    fn dict_string<T: DictDefault>(
        &self,
        dict: &Dict<T>,
        op: Operator,
    ) -> Result<Option<String>, ParseError> {
        self.dict_sid(dict, op)
            .map(|sid| sid.map(|sid| self.strings.get(sid).into_owned()))
    }
}

fn lookup_offset_index(off_size: u8, offset_array: &[u8], index: usize) -> Option<usize> {
    let start = index * usize::from(off_size);
    let buf = offset_array.get(start..start + usize::from(off_size))?;
    match off_size {
        1 => Some(usize::from(buf[0])),
        2 => Some(usize::from(BigEndian::read_u16(buf))),
        3 => usize::try_from(BigEndian::read_u24(buf)).ok(),
        4 => usize::try_from(BigEndian::read_u32(buf)).ok(),
        _ => None,
    }
}

fn read_cid_data<'a>(
    scope: &ReadScope<'a>,
    top_dict: &TopDict,
    n_glyphs: usize,
) -> Result<CIDData<'a>, ParseError> {
    // The Top DICT begins with ROS operator
    // which specifies the Registry-Ordering-Supplement for the font.
    let (registry, ordering, supplement) = match top_dict.get(Operator::ROS) {
        Some([Operand::Integer(registry), Operand::Integer(ordering), supplement]) => (
            SID::try_from(*registry)?,
            SID::try_from(*ordering)?,
            supplement.to_f64()? as i32,
        ),
        _ => return Err(ParseError::BadValue),
    };

    // • The FDArray operator is expected to be present, with a single
    //   argument specifying an offset to the Font DICT INDEX. Each
    //   Font DICT in this array specifies information unique to a
    //   particular group of glyphs in the font.
    let offset = top_dict
        .get_i32(Operator::FDArray)
        .ok_or(ParseError::MissingValue)??;
    let font_dict_index = scope.offset(usize::try_from(offset)?).read::<Index<'a>>()?;
    if font_dict_index.is_empty() {
        return Err(ParseError::MissingValue);
    }

    let offset = top_dict
        .get_i32(Operator::FDSelect)
        .ok_or(ParseError::MissingValue)??;
    let fd_select = scope
        .offset(usize::try_from(offset)?)
        .read_dep::<FDSelect<'a>>(n_glyphs)?;

    let mut font_dicts = Vec::with_capacity(font_dict_index.count);
    let mut private_dicts = Vec::with_capacity(font_dict_index.count);
    let mut local_subr_indices = Vec::with_capacity(font_dict_index.count);
    for object in font_dict_index.iter() {
        let font_dict = ReadScope::new(object).read::<FontDict>()?;
        let (private_dict, private_dict_offset) = font_dict.read_private_dict(scope)?;
        let local_subr_index = read_local_subr_index(scope, &private_dict, private_dict_offset)?;

        font_dicts.push(font_dict);
        private_dicts.push(private_dict);
        local_subr_indices.push(local_subr_index);
    }

    Ok(CIDData {
        registry,
        ordering,
        supplement,
        font_dict_index,
        font_dicts,
        private_dicts,
        local_subr_indices,
        fd_select,
    })
}

fn read_encoding<'a>(
    scope: &ReadScope<'a>,
    top_dict: &TopDict,
) -> Result<Encoding<'a>, ParseError> {
    let offset = top_dict
        .get_i32(Operator::Encoding)
        .ok_or(ParseError::MissingValue)??;
    let encoding = match offset {
        0 => Encoding::Standard,
        1 => Encoding::Expert,
        _ => Encoding::Custom(
            scope
                .offset(usize::try_from(offset)?)
                .read::<CustomEncoding<'_>>()?,
        ),
    };

    Ok(encoding)
}

fn read_charset<'a>(
    scope: &ReadScope<'a>,
    top_dict: &TopDict,
    n_glyphs: usize,
    is_cid: bool,
) -> Result<Charset<'a>, ParseError> {
    // An absent charset means CID = GID in a CID-keyed font
    let offset = match top_dict.get(Operator::Charset) {
        None if is_cid => return Ok(Charset::Cid(CidCharset::Identity { n_glyphs })),
        None => return Ok(Charset::ISOAdobe),
        Some([Operand::Integer(offset)]) | Some([Operand::Offset(offset)]) => *offset,
        Some(_) => return Err(ParseError::BadValue),
    };
    let charset = match (is_cid, offset) {
        (false, 0) => Charset::ISOAdobe,
        (false, 1) => Charset::Expert,
        (false, 2) => Charset::ExpertSubset,
        (false, _) => Charset::Custom(
            scope
                .offset(usize::try_from(offset)?)
                .read_dep::<CustomCharset<'_>>(n_glyphs)?,
        ),
        (true, _) => Charset::Cid(CidCharset::Custom(
            scope
                .offset(usize::try_from(offset)?)
                .read_dep::<CustomCharset<'_>>(n_glyphs)?,
        )),
    };

    Ok(charset)
}

fn read_local_subr_index<'a>(
    scope: &ReadScope<'a>,
    private_dict: &PrivateDict,
    private_dict_offset: usize,
) -> Result<Option<Index<'a>>, ParseError> {
    // Local subrs are stored in an INDEX structure which is located via the offset operand
    // of the Subrs operator in the Private DICT. A font without local subrs has no Subrs
    // operator in the Private DICT. The local subrs offset is relative to the beginning of
    // the Private DICT data.
    match private_dict.get_i32(Operator::Subrs).transpose()? {
        Some(offset) if offset > 0 => {
            let offset = usize::try_from(offset)?;
            scope
                .offset(private_dict_offset + offset)
                .read::<Index<'_>>()
                .map(Some)
        }
        _ => Ok(None),
    }
}

const STANDARD_STRINGS: [&str; 391] = [
    ".notdef",
    "space",
    "exclam",
    "quotedbl",
    "numbersign",
    "dollar",
    "percent",
    "ampersand",
    "quoteright",
    "parenleft",
    "parenright",
    "asterisk",
    "plus",
    "comma",
    "hyphen",
    "period",
    "slash",
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "colon",
    "semicolon",
    "less",
    "equal",
    "greater",
    "question",
    "at",
    "A",
    "B",
    "C",
    "D",
    "E",
    "F",
    "G",
    "H",
    "I",
    "J",
    "K",
    "L",
    "M",
    "N",
    "O",
    "P",
    "Q",
    "R",
    "S",
    "T",
    "U",
    "V",
    "W",
    "X",
    "Y",
    "Z",
    "bracketleft",
    "backslash",
    "bracketright",
    "asciicircum",
    "underscore",
    "quoteleft",
    "a",
    "b",
    "c",
    "d",
    "e",
    "f",
    "g",
    "h",
    "i",
    "j",
    "k",
    "l",
    "m",
    "n",
    "o",
    "p",
    "q",
    "r",
    "s",
    "t",
    "u",
    "v",
    "w",
    "x",
    "y",
    "z",
    "braceleft",
    "bar",
    "braceright",
    "asciitilde",
    "exclamdown",
    "cent",
    "sterling",
    "fraction",
    "yen",
    "florin",
    "section",
    "currency",
    "quotesingle",
    "quotedblleft",
    "guillemotleft",
    "guilsinglleft",
    "guilsinglright",
    "fi",
    "fl",
    "endash",
    "dagger",
    "daggerdbl",
    "periodcentered",
    "paragraph",
    "bullet",
    "quotesinglbase",
    "quotedblbase",
    "quotedblright",
    "guillemotright",
    "ellipsis",
    "perthousand",
    "questiondown",
    "grave",
    "acute",
    "circumflex",
    "tilde",
    "macron",
    "breve",
    "dotaccent",
    "dieresis",
    "ring",
    "cedilla",
    "hungarumlaut",
    "ogonek",
    "caron",
    "emdash",
    "AE",
    "ordfeminine",
    "Lslash",
    "Oslash",
    "OE",
    "ordmasculine",
    "ae",
    "dotlessi",
    "lslash",
    "oslash",
    "oe",
    "germandbls",
    "onesuperior",
    "logicalnot",
    "mu",
    "trademark",
    "Eth",
    "onehalf",
    "plusminus",
    "Thorn",
    "onequarter",
    "divide",
    "brokenbar",
    "degree",
    "thorn",
    "threequarters",
    "twosuperior",
    "registered",
    "minus",
    "eth",
    "multiply",
    "threesuperior",
    "copyright",
    "Aacute",
    "Acircumflex",
    "Adieresis",
    "Agrave",
    "Aring",
    "Atilde",
    "Ccedilla",
    "Eacute",
    "Ecircumflex",
    "Edieresis",
    "Egrave",
    "Iacute",
    "Icircumflex",
    "Idieresis",
    "Igrave",
    "Ntilde",
    "Oacute",
    "Ocircumflex",
    "Odieresis",
    "Ograve",
    "Otilde",
    "Scaron",
    "Uacute",
    "Ucircumflex",
    "Udieresis",
    "Ugrave",
    "Yacute",
    "Ydieresis",
    "Zcaron",
    "aacute",
    "acircumflex",
    "adieresis",
    "agrave",
    "aring",
    "atilde",
    "ccedilla",
    "eacute",
    "ecircumflex",
    "edieresis",
    "egrave",
    "iacute",
    "icircumflex",
    "idieresis",
    "igrave",
    "ntilde",
    "oacute",
    "ocircumflex",
    "odieresis",
    "ograve",
    "otilde",
    "scaron",
    "uacute",
    "ucircumflex",
    "udieresis",
    "ugrave",
    "yacute",
    "ydieresis",
    "zcaron",
    "exclamsmall",
    "Hungarumlautsmall",
    "dollaroldstyle",
    "dollarsuperior",
    "ampersandsmall",
    "Acutesmall",
    "parenleftsuperior",
    "parenrightsuperior",
    "twodotenleader",
    "onedotenleader",
    "zerooldstyle",
    "oneoldstyle",
    "twooldstyle",
    "threeoldstyle",
    "fouroldstyle",
    "fiveoldstyle",
    "sixoldstyle",
    "sevenoldstyle",
    "eightoldstyle",
    "nineoldstyle",
    "commasuperior",
    "threequartersemdash",
    "periodsuperior",
    "questionsmall",
    "asuperior",
    "bsuperior",
    "centsuperior",
    "dsuperior",
    "esuperior",
    "isuperior",
    "lsuperior",
    "msuperior",
    "nsuperior",
    "osuperior",
    "rsuperior",
    "ssuperior",
    "tsuperior",
    "ff",
    "ffi",
    "ffl",
    "parenleftinferior",
    "parenrightinferior",
    "Circumflexsmall",
    "hyphensuperior",
    "Gravesmall",
    "Asmall",
    "Bsmall",
    "Csmall",
    "Dsmall",
    "Esmall",
    "Fsmall",
    "Gsmall",
    "Hsmall",
    "Ismall",
    "Jsmall",
    "Ksmall",
    "Lsmall",
    "Msmall",
    "Nsmall",
    "Osmall",
    "Psmall",
    "Qsmall",
    "Rsmall",
    "Ssmall",
    "Tsmall",
    "Usmall",
    "Vsmall",
    "Wsmall",
    "Xsmall",
    "Ysmall",
    "Zsmall",
    "colonmonetary",
    "onefitted",
    "rupiah",
    "Tildesmall",
    "exclamdownsmall",
    "centoldstyle",
    "Lslashsmall",
    "Scaronsmall",
    "Zcaronsmall",
    "Dieresissmall",
    "Brevesmall",
    "Caronsmall",
    "Dotaccentsmall",
    "Macronsmall",
    "figuredash",
    "hypheninferior",
    "Ogoneksmall",
    "Ringsmall",
    "Cedillasmall",
    "questiondownsmall",
    "oneeighth",
    "threeeighths",
    "fiveeighths",
    "seveneighths",
    "onethird",
    "twothirds",
    "zerosuperior",
    "foursuperior",
    "fivesuperior",
    "sixsuperior",
    "sevensuperior",
    "eightsuperior",
    "ninesuperior",
    "zeroinferior",
    "oneinferior",
    "twoinferior",
    "threeinferior",
    "fourinferior",
    "fiveinferior",
    "sixinferior",
    "seveninferior",
    "eightinferior",
    "nineinferior",
    "centinferior",
    "dollarinferior",
    "periodinferior",
    "commainferior",
    "Agravesmall",
    "Aacutesmall",
    "Acircumflexsmall",
    "Atildesmall",
    "Adieresissmall",
    "Aringsmall",
    "AEsmall",
    "Ccedillasmall",
    "Egravesmall",
    "Eacutesmall",
    "Ecircumflexsmall",
    "Edieresissmall",
    "Igravesmall",
    "Iacutesmall",
    "Icircumflexsmall",
    "Idieresissmall",
    "Ethsmall",
    "Ntildesmall",
    "Ogravesmall",
    "Oacutesmall",
    "Ocircumflexsmall",
    "Otildesmall",
    "Odieresissmall",
    "OEsmall",
    "Oslashsmall",
    "Ugravesmall",
    "Uacutesmall",
    "Ucircumflexsmall",
    "Udieresissmall",
    "Yacutesmall",
    "Thornsmall",
    "Ydieresissmall",
    "001.000",
    "001.001",
    "001.002",
    "001.003",
    "Black",
    "Bold",
    "Book",
    "Light",
    "Medium",
    "Regular",
    "Roman",
    "Semibold",
];

#[allow(dead_code)]
