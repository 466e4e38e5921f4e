use crate::error::{DecodeError, Result};
use crate::model::{FieldValue, SegmentKind};

/// Контракт контейнера полей сегмента.
///
/// Сегменты разбирает внешний разборщик строк фиксированной ширины;
/// здесь они только читаются.
pub trait SegmentFields {
    /// Какой это сегмент (T/U/W)
    fn kind(&self) -> SegmentKind;

    /// Есть ли поле в сегменте
    fn has_field(&self, name: &str) -> bool;

    /// Сырое значение поля
    ///
    /// Если поля нет - [`DecodeError::MissingField`], без подстановки значения по умолчанию.
    fn get(&self, name: &'static str) -> Result<&FieldValue>;

    /// Человекочитаемый дамп всех полей
    fn dump(&self) -> String;
}

/// Простой контейнер полей в памяти, сохраняет порядок вставки
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    kind: SegmentKind,
    fields: Vec<(String, FieldValue)>,
}

impl Segment {
    pub fn new(kind: SegmentKind) -> Self {
        Segment {
            kind,
            fields: Vec::new(),
        }
    }

    /// Добавляет поле, заменяя прежнее значение с тем же именем.
    ///
    /// Возвращает прежнее значение, если оно было.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        let name = name.into();
        if let Some((_, slot)) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            return Some(std::mem::replace(slot, value));
        }
        self.fields.push((name, value));
        None
    }

    /// Вариант [`Segment::insert`] для цепочек
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl SegmentFields for Segment {
    fn kind(&self) -> SegmentKind {
        self.kind
    }

    fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    fn get(&self, name: &'static str) -> Result<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .ok_or(DecodeError::MissingField {
                segment: self.kind,
                field: name,
            })
    }

    fn dump(&self) -> String {
        if self.is_empty() {
            return "(sem campos)\n".to_string();
        }
        let width = self.fields.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
        let mut out = String::new();
        for (name, value) in &self.fields {
            out.push_str(&format!("{name:<width$} : {value}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_on_absent_field_is_missing_field_error() {
        let seg = Segment::new(SegmentKind::U);
        match seg.get("valor_pago").unwrap_err() {
            DecodeError::MissingField { segment, field } => {
                assert_eq!(segment, SegmentKind::U);
                assert_eq!(field, "valor_pago");
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn insert_replaces_existing_value_in_place() {
        let mut seg = Segment::new(SegmentKind::T)
            .with_field("carteira", FieldValue::Text("1".into()))
            .with_field("agencia_dv", FieldValue::Text("X".into()));

        let prev = seg.insert("carteira", FieldValue::Text("2".into()));

        assert_eq!(prev, Some(FieldValue::Text("1".into())));
        assert_eq!(seg.len(), 2);
        assert_eq!(seg.get("carteira").unwrap(), &FieldValue::Text("2".into()));
        assert!(seg.has_field("agencia_dv"));
        assert!(!seg.has_field("nosso_numero"));
    }

    #[test]
    fn dump_lists_fields_in_insertion_order() {
        let seg = Segment::new(SegmentKind::T)
            .with_field("nosso_numero", FieldValue::Text("123".into()))
            .with_field("codigo_movimento", FieldValue::Integer(6));

        assert_eq!(seg.dump(), "nosso_numero     : \"123\"\ncodigo_movimento : 6\n");
    }

    #[test]
    fn dump_of_empty_segment_says_so() {
        let seg = Segment::new(SegmentKind::W);
        assert!(seg.is_empty());
        assert_eq!(seg.dump(), "(sem campos)\n");
    }
}
