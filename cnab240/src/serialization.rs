mod common;
use std::fmt;
use std::io::Write;
use csv::WriterBuilder;
use quick_xml::se::to_utf8_io_writer;
use crate::detail::DecodedDetail;
use crate::error::Result;

impl DecodedDetail {
    /// Записывает снимок в CSV из двух колонок `field,value`
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        wtr.write_record(["field", "value"])?;
        for (field, value) in common::rows(self) {
            wtr.write_record([field, value.as_str()])?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Записывает снимок в XML, корневой элемент `<DecodedDetail>`
    pub fn write_xml<W: Write>(&self, writer: W) -> Result<()> {
        to_utf8_io_writer(writer, self)?;
        Ok(())
    }
}

impl fmt::Display for DecodedDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = common::rows(self);
        let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, value) in rows {
            writeln!(f, "{name:<width$}  {value}")?;
        }
        Ok(())
    }
}
