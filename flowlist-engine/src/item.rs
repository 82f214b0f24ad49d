use crate::EngineKey;
use crate::expiry::Countdown;

/// An item of the rendered sequence.
///
/// The engine never looks inside the payload. It needs exactly two things:
///
/// - a **stable identity** ([`key`]), the sole basis for structural diffing
///   between two full snapshots. Identities must be unique within a
///   snapshot.
/// - a **content hash** ([`content_hash`]) covering only the fields that
///   affect layout or derived render state. Two items with equal keys and
///   equal content hashes are treated as the same rendered row; a differing
///   hash marks an in-place payload change. This is a structural-field
///   comparison, not deep equality: hash what the renderer can see.
///
/// [`key`]: ListItem::key
/// [`content_hash`]: ListItem::content_hash
pub trait ListItem {
    type Key: Clone + EngineKey;

    fn key(&self) -> Self::Key;

    fn content_hash(&self) -> u64;
}

/// Items that may carry a live countdown (e.g. a view-once image timer).
///
/// The countdown is derived from the payload but published as a side-channel
/// value; it is never part of the structural diff.
pub trait HasCountdown {
    fn countdown(&self) -> Option<Countdown>;
}
