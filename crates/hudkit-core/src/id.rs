//! Stable widget identifiers.

use slotmap::new_key_type;

new_key_type! {
    /// A unique identifier for a widget in a widget tree.
    ///
    /// `WidgetId`s are stable handles that stay valid while the tree is
    /// reshaped. They become stale when the widget is destroyed; a stale key
    /// simply resolves to nothing.
    pub struct WidgetId;
}

impl WidgetId {
    /// Convert the id to a raw u64 value, e.g. for an external handle.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Recreate an id from a raw value produced by [`WidgetId::as_raw`].
    ///
    /// This does not check that the widget still exists.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_raw_roundtrip() {
        let mut map: SlotMap<WidgetId, ()> = SlotMap::with_key();
        let id = map.insert(());
        assert_eq!(WidgetId::from_raw(id.as_raw()), id);
    }
}
