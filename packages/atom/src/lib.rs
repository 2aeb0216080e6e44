//! Key interning for XMessage.
//!
//! Every key used to name a message slot is canonicalized here into an
//! [`Atom`]: a handle to process-wide storage for the key text. Interning the
//! same text twice yields the same storage, so two atoms compare equal exactly
//! when their text is equal, and that comparison is a pointer check instead of
//! a string scan.
//!
//! The table is populated lazily and never shrinks. Key vocabularies are small
//! and reused constantly, so the leaked storage stays bounded in practice.
//!
//! # Example
//!
//! ```rust
//! use xmessage_atom::Atom;
//!
//! let a = Atom::intern("width");
//! let b = Atom::intern(&String::from("width"));
//!
//! assert_eq!(a, b);
//! assert!(Atom::ptr_eq(a, b));
//! assert_eq!(a.as_str(), "width");
//! ```

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, PoisonError};

use lazy_static::lazy_static;

lazy_static! {
    static ref ATOMS: Mutex<HashSet<&'static str>> = Mutex::new(HashSet::new());
}

/// An interned key.
///
/// Equality and hashing use the address of the interned storage, never the
/// text itself.
#[derive(Clone, Copy)]
pub struct Atom(&'static str);

impl Atom {
    /// Intern `text`, returning its canonical handle.
    pub fn intern(text: &str) -> Atom {
        let mut table = ATOMS.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = table.get(text) {
            return Atom(*existing);
        }

        let stored: &'static str = Box::leak(text.to_owned().into_boxed_str());
        table.insert(stored);
        log::trace!("interned key {:?} ({} keys total)", stored, table.len());
        Atom(stored)
    }

    /// The key text.
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Identity comparison. Same as `==`, spelled out for call sites that
    /// want to make the pointer check explicit.
    pub fn ptr_eq(a: Atom, b: Atom) -> bool {
        std::ptr::eq(a.0, b.0)
    }
}

/// Intern `text`. Shorthand for [`Atom::intern`].
pub fn intern(text: &str) -> Atom {
    Atom::intern(text)
}

/// Number of distinct keys interned so far by this process.
pub fn atom_count() -> usize {
    ATOMS.lock().unwrap_or_else(PoisonError::into_inner).len()
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        Atom::ptr_eq(*self, *other)
    }
}

impl Eq for Atom {}

impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.0.as_ptr() as usize).hash(state);
        self.0.len().hash(state);
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({:?})", self.0)
    }
}

impl From<&str> for Atom {
    fn from(text: &str) -> Self {
        Atom::intern(text)
    }
}

impl From<&String> for Atom {
    fn from(text: &String) -> Self {
        Atom::intern(text)
    }
}

impl AsRef<str> for Atom {
    fn as_ref(&self) -> &str {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn equal_text_yields_identical_storage() {
        let owned = String::from("frame-rate");
        let a = Atom::intern("frame-rate");
        let b = Atom::intern(&owned);

        assert_eq!(a, b);
        assert!(std::ptr::eq(a.as_str().as_ptr(), b.as_str().as_ptr()));
        // The interned copy never aliases the caller's buffer.
        assert!(!std::ptr::eq(a.as_str().as_ptr(), owned.as_ptr()));
    }

    #[test]
    fn different_text_yields_different_atoms() {
        let a = Atom::intern("left");
        let b = Atom::intern("right");
        assert_ne!(a, b);
        assert!(!Atom::ptr_eq(a, b));
    }

    #[test]
    fn count_covers_interned_keys() {
        let key = "atom-count-probe-key";
        Atom::intern(key);
        let before = atom_count();
        Atom::intern(key);
        Atom::intern(key);
        // Other tests may intern concurrently, so only a lower bound holds.
        assert!(atom_count() >= before);
        assert_eq!(Atom::intern(key).as_str(), key);
    }

    #[test]
    fn hash_is_consistent_with_eq() {
        let mut set = HashSet::new();
        set.insert(Atom::intern("a"));
        set.insert(Atom::intern("b"));
        set.insert(Atom::intern("a"));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Atom::from("b")));
    }

    #[test]
    fn empty_key_is_interned() {
        let a = Atom::intern("");
        let b = Atom::intern("");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "");
    }

    #[test]
    fn display_and_debug() {
        let a = intern("what");
        assert_eq!(format!("{}", a), "what");
        assert_eq!(format!("{:?}", a), "Atom(\"what\")");
    }

    #[test]
    fn concurrent_interning_agrees() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| Atom::intern("shared-across-threads")))
            .collect();

        let atoms: Vec<Atom> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for atom in &atoms {
            assert_eq!(*atom, atoms[0]);
        }
    }
}
