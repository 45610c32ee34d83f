//! SFNT container parsing.
//!
//! CFF data may arrive bare or embedded as the `CFF ` table of an OpenType font. Only the table
//! directory is read; none of the other tables are interpreted.

use crate::binary::read::{ReadArray, ReadBinary, ReadCtxt, ReadFrom, ReadScope};
use crate::binary::U32Be;
use crate::error::ParseError;
use crate::tag;

use std::convert::TryFrom;

/// Magic value identifying a CFF font (`OTTO`)
pub const CFF_MAGIC: u32 = tag::OTTO;

/// Magic number identifying TrueType 1.0
///
/// The version number 1.0 as a 16.16 fixed-point value, indicating TrueType glyph data.
pub const TTF_MAGIC: u32 = 0x00010000;

/// Magic value identifying a TrueType font collection `ttcf`
pub const TTCF_MAGIC: u32 = tag::TTCF;

/// The SFNT table directory.
pub struct OffsetTable<'a> {
    pub sfnt_version: u32,
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
    pub table_records: ReadArray<'a, TableRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableRecord {
    pub table_tag: u32,
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

impl<'b> ReadBinary for OffsetTable<'b> {
    type HostType<'a> = OffsetTable<'a>;

    fn read<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<Self::HostType<'a>, ParseError> {
        let sfnt_version = ctxt.read_u32be()?;
        match sfnt_version {
            CFF_MAGIC => {
                let num_tables = ctxt.read_u16be()?;
                let search_range = ctxt.read_u16be()?;
                let entry_selector = ctxt.read_u16be()?;
                let range_shift = ctxt.read_u16be()?;
                let table_records = ctxt.read_array::<TableRecord>(usize::from(num_tables))?;
                Ok(OffsetTable {
                    sfnt_version,
                    search_range,
                    entry_selector,
                    range_shift,
                    table_records,
                })
            }
            TTF_MAGIC | TTCF_MAGIC | tag::TRUE => {
                Err(ParseError::UnsupportedContainer(sfnt_version))
            }
            _ => Err(ParseError::BadVersion),
        }
    }
}

impl ReadFrom for TableRecord {
    type ReadType = ((U32Be, U32Be), (U32Be, U32Be));

    fn read_from(((table_tag, checksum), (offset, length)): ((u32, u32), (u32, u32))) -> Self {
        TableRecord {
            table_tag,
            checksum,
            offset,
            length,
        }
    }
}

impl<'a> OffsetTable<'a> {
    pub fn find_table_record(&self, tag: u32) -> Option<TableRecord> {
        self.table_records
            .iter()
            .find(|table_record| table_record.table_tag == tag)
    }

    pub fn read_table(
        &self,
        scope: &ReadScope<'a>,
        tag: u32,
    ) -> Result<Option<ReadScope<'a>>, ParseError> {
        if let Some(table_record) = self.find_table_record(tag) {
            let table = table_record.read_table(scope)?;
            Ok(Some(table))
        } else {
            Ok(None)
        }
    }
}

impl TableRecord {
    pub fn read_table<'a>(&self, scope: &ReadScope<'a>) -> Result<ReadScope<'a>, ParseError> {
        let offset = usize::try_from(self.offset)?;
        let length = usize::try_from(self.length)?;
        scope.offset_length(offset, length)
    }
}

/// Locate the CFF program within `scope`.
///
/// If the data starts with an SFNT tag the table directory is searched for the `CFF ` table,
/// otherwise the data is assumed to be a bare CFF program and is returned unchanged. TrueType
/// flavoured containers and collections are rejected.
pub fn cff_table_data<'a>(scope: ReadScope<'a>) -> Result<ReadScope<'a>, ParseError> {
    let magic = match scope.ctxt().read_u32be() {
        Ok(magic) => magic,
        // Too short to be a container. Let the CFF header parse report the problem.
        Err(_) => return Ok(scope),
    };
    match magic {
        CFF_MAGIC | TTF_MAGIC | TTCF_MAGIC | tag::TRUE => {
            let offset_table = scope.read::<OffsetTable<'_>>()?;
            offset_table
                .read_table(&scope, tag::CFF)?
                .ok_or(ParseError::MissingTable(tag::CFF))
        }
        _ => Ok(scope),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{sfnt_wrap, CffBuilder};

    #[test]
    fn test_bare_cff_passes_through() {
        let data = CffBuilder::new().build();
        let scope = cff_table_data(ReadScope::new(&data)).unwrap();
        assert_eq!(scope.data(), &data[..]);
        assert_eq!(scope.base(), 0);
    }

    #[test]
    fn test_find_cff_table() {
        let cff = CffBuilder::new().build();
        let data = sfnt_wrap(CFF_MAGIC, &[(tag!(b"head"), &[0u8; 8][..]), (tag::CFF, &cff[..])]);
        let scope = cff_table_data(ReadScope::new(&data)).unwrap();
        assert_eq!(scope.data(), &cff[..]);
    }

    #[test]
    fn test_missing_cff_table() {
        let data = sfnt_wrap(CFF_MAGIC, &[(tag!(b"head"), &[0u8; 8][..])]);
        assert_eq!(
            cff_table_data(ReadScope::new(&data)).err(),
            Some(ParseError::MissingTable(tag::CFF))
        );
    }

    #[test]
    fn test_truetype_rejected() {
        let data = sfnt_wrap(TTF_MAGIC, &[(tag!(b"glyf"), &[0u8; 4][..])]);
        assert_eq!(
            cff_table_data(ReadScope::new(&data)).err(),
            Some(ParseError::UnsupportedContainer(TTF_MAGIC))
        );

        let data = [b't', b't', b'c', b'f', 0, 1, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            cff_table_data(ReadScope::new(&data)).err(),
            Some(ParseError::UnsupportedContainer(TTCF_MAGIC))
        );
    }
}
