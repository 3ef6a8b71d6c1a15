use crate::geometry::{Sector, compute_sectors};
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgba;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest number of items a wheel can hold.
pub const MIN_ITEMS: usize = 2;
/// Largest number of items a wheel can hold.
pub const MAX_ITEMS: usize = 8;

/// Smallest assignable item value.
pub const MIN_VALUE: u8 = 1;
/// Largest assignable item value.
pub const MAX_VALUE: u8 = 10;
/// Value a fresh or reset item holds.
pub const DEFAULT_VALUE: u8 = 10;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
#[from(String, &str)]
pub struct WheelTitle(String);

crate::impl_string_newtype!(WheelTitle);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
#[from(String, &str)]
pub struct ItemName(String);

crate::impl_string_newtype!(ItemName);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a wheel needs at least {MIN_ITEMS} items, got {0}")]
    TooFewItems(usize),
    #[error("a wheel can hold at most {MAX_ITEMS} items, got {0}")]
    TooManyItems(usize),
    #[error("item value must be between {MIN_VALUE} and {MAX_VALUE}, got {0}")]
    ValueOutOfRange(u8),
    #[error("wheels have {expected} items, target has {actual}")]
    ItemCountMismatch { expected: usize, actual: usize },
}

/// One labeled slice of the wheel. Items live inside exactly one [`Wheel`]
/// and are addressed by index, never by shared reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelItem {
    name: ItemName,
    color: Srgba<f64>,
    value: u8,
}

impl WheelItem {
    /// A new item holding the default value (10).
    pub fn new(name: impl Into<ItemName>, color: Srgba<f64>) -> Self {
        Self {
            name: name.into(),
            color,
            value: DEFAULT_VALUE,
        }
    }

    pub fn with_value(
        name: impl Into<ItemName>,
        color: Srgba<f64>,
        value: u8,
    ) -> Result<Self, ValidationError> {
        let mut item = Self::new(name, color);
        item.set_value(value)?;
        Ok(item)
    }

    pub fn name(&self) -> &ItemName {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<ItemName>) {
        self.name = name.into();
    }

    pub fn color(&self) -> Srgba<f64> {
        self.color
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Assigns a value, rejecting anything outside 1..=10.
    pub fn set_value(&mut self, value: u8) -> Result<(), ValidationError> {
        if !(MIN_VALUE..=MAX_VALUE).contains(&value) {
            return Err(ValidationError::ValueOutOfRange(value));
        }
        self.value = value;
        Ok(())
    }

    pub fn reset_value(&mut self) {
        self.value = DEFAULT_VALUE;
    }
}

/// The wheel model: an ordered set of items plus the derived per-item
/// angular sectors. Cloning produces a fully independent deep copy; the
/// widget always works on such a copy and the caller reads it back when the
/// interaction is over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wheel {
    type_id: i32,
    title: WheelTitle,
    items: Vec<WheelItem>,
    #[serde(skip, default)]
    sectors: Vec<Sector>,
    timestamp_saved: Option<i64>,
}

impl Wheel {
    /// Type id of a wheel that has never been saved by the host.
    pub const UNSAVED: i32 = -1;

    pub fn new(
        type_id: i32,
        title: impl Into<WheelTitle>,
        items: Vec<WheelItem>,
    ) -> Result<Self, ValidationError> {
        if items.len() < MIN_ITEMS {
            return Err(ValidationError::TooFewItems(items.len()));
        }
        if items.len() > MAX_ITEMS {
            return Err(ValidationError::TooManyItems(items.len()));
        }
        let sectors = compute_sectors(items.len());
        Ok(Self {
            type_id,
            title: title.into(),
            items,
            sectors,
            timestamp_saved: None,
        })
    }

    pub fn type_id(&self) -> i32 {
        self.type_id
    }

    pub fn set_type_id(&mut self, id: i32) {
        self.type_id = id;
    }

    pub fn title(&self) -> &WheelTitle {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<WheelTitle>) {
        self.title = title.into();
    }

    pub fn timestamp_saved(&self) -> Option<i64> {
        self.timestamp_saved
    }

    pub fn set_timestamp_saved(&mut self, timestamp: i64) {
        self.timestamp_saved = Some(timestamp);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Companion to [`Wheel::len`]; always false for a constructed wheel,
    /// which holds at least [`MIN_ITEMS`] items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[WheelItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&WheelItem> {
        self.items.get(index)
    }

    pub(crate) fn item_mut(&mut self, index: usize) -> Option<&mut WheelItem> {
        self.items.get_mut(index)
    }

    /// The angular sector occupied by the item at `index`.
    pub fn sector(&self, index: usize) -> Option<Sector> {
        self.sectors.get(index).copied()
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn average_value(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        let total: u32 = self.items.iter().map(|i| u32::from(i.value())).sum();
        f64::from(total) / self.items.len() as f64
    }

    pub fn reset_values(&mut self) {
        for item in &mut self.items {
            item.reset_value();
        }
    }

    /// Restores the derived sectors after deserialization, which skips
    /// them. Re-checks the item-count invariant since serde bypasses
    /// [`Wheel::new`].
    pub fn restore_sectors(&mut self) -> Result<(), ValidationError> {
        if self.items.len() < MIN_ITEMS {
            return Err(ValidationError::TooFewItems(self.items.len()));
        }
        if self.items.len() > MAX_ITEMS {
            return Err(ValidationError::TooManyItems(self.items.len()));
        }
        if self.sectors.len() != self.items.len() {
            self.sectors = compute_sectors(self.items.len());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> Srgba<f64> {
        Srgba::new(0.2, 0.4, 0.6, 1.0)
    }

    fn wheel(values: &[u8]) -> Wheel {
        let items = values
            .iter()
            .enumerate()
            .map(|(i, &v)| WheelItem::with_value(format!("item {i}"), color(), v).unwrap())
            .collect();
        Wheel::new(Wheel::UNSAVED, "test", items).unwrap()
    }

    #[test]
    fn value_bounds_are_enforced() {
        let mut item = WheelItem::new("health", color());
        assert_eq!(item.value(), DEFAULT_VALUE);
        assert_eq!(item.set_value(0), Err(ValidationError::ValueOutOfRange(0)));
        assert_eq!(
            item.set_value(11),
            Err(ValidationError::ValueOutOfRange(11))
        );
        item.set_value(3).unwrap();
        assert_eq!(item.value(), 3);
    }

    #[test]
    fn item_count_bounds_are_enforced() {
        let one = vec![WheelItem::new("alone", color())];
        assert_eq!(
            Wheel::new(Wheel::UNSAVED, "t", one).unwrap_err(),
            ValidationError::TooFewItems(1)
        );

        let nine = (0..9).map(|i| WheelItem::new(format!("{i}"), color())).collect();
        assert_eq!(
            Wheel::new(Wheel::UNSAVED, "t", nine).unwrap_err(),
            ValidationError::TooManyItems(9)
        );
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let original = wheel(&[4, 5, 6]);
        let mut copy = original.clone();
        copy.item_mut(1).unwrap().set_value(9).unwrap();
        copy.set_title("renamed");

        assert_eq!(original.item(1).unwrap().value(), 5);
        assert_eq!(original.title().as_ref(), "test");
        assert_eq!(copy.item(1).unwrap().value(), 9);
    }

    #[test]
    fn sectors_follow_item_count() {
        for n in MIN_ITEMS..=MAX_ITEMS {
            let w = wheel(&vec![5; n]);
            assert!(!w.is_empty());
            assert_eq!(w.sectors().len(), n);
            assert_eq!(w.sector(n - 1).unwrap().end, 360);
        }
    }

    #[test]
    fn average_and_reset() {
        let mut w = wheel(&[2, 4, 6, 8]);
        assert!((w.average_value() - 5.0).abs() < f64::EPSILON);
        w.reset_values();
        assert!(w.items().iter().all(|i| i.value() == DEFAULT_VALUE));
    }

    #[test]
    fn serde_round_trip_restores_sectors() {
        let w = wheel(&[1, 10, 5]);
        let json = serde_json::to_string(&w).unwrap();
        let mut back: Wheel = serde_json::from_str(&json).unwrap();
        back.restore_sectors().unwrap();

        assert_eq!(back.items(), w.items());
        assert_eq!(back.sectors(), w.sectors());
        assert_eq!(back.title(), w.title());
    }
}
