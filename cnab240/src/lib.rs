//! Декодирование детальной записи (сегменты T, U, W) файла возврата CNAB240.
//!
//! Разбор строк фиксированной ширины сюда не входит: сегменты приходят уже
//! разобранными на именованные поля (см. [`SegmentFields`]).

pub mod error;
pub mod model;
pub mod segment;
pub mod context;
pub mod fields;
pub mod movement;
pub mod extract;
pub mod quirks;
pub mod detail;
pub mod fields_csv;
pub mod serialization;

mod utils;

pub use crate::model::{Amount, Bank, FieldValue, SegmentKind};
pub use crate::segment::{Segment, SegmentFields};
pub use crate::context::{FileContext, ReturnFileHeader};
pub use crate::movement::{Classification, MovementCode};
pub use crate::detail::{DecodedDetail, DetailRecord};
pub use crate::fields_csv::SegmentSet;
pub use crate::error::DecodeError;
