//! Published current-view cell.
//!
//! Each scope instance (the cluster singleton, or one index) owns a
//! [`SettingsCell`] holding its current [`SettingsView`]. Readers load the
//! current snapshot lock-free; writers build the successor fully, then swap
//! it in atomically. A mutex serializes writers per instance so two
//! concurrent updates cannot publish divergent successors from the same
//! base.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use crate::error::Result;
use crate::merge::Source;
use crate::view::SettingsView;


/// Owner of the current effective view for one scope instance.
pub struct SettingsCell {
	current: ArcSwap<SettingsView>,
	write: Mutex<()>,
}

impl SettingsCell {
	/// Wraps an initial view, typically fresh from
	/// [`Catalog::build_view`](crate::catalog::Catalog::build_view).
	pub fn new(view: SettingsView) -> Self {
		Self {
			current: ArcSwap::from_pointee(view),
			write: Mutex::new(()),
		}
	}

	/// Loads the current snapshot. The returned `Arc` stays valid and
	/// internally consistent even after later swaps.
	pub fn load(&self) -> Arc<SettingsView> {
		self.current.load_full()
	}

	/// Applies a batch of runtime changes and publishes the successor view.
	///
	/// On rejection the current view stays in effect and is returned to
	/// readers unchanged.
	pub fn apply_update<'a>(
		&self,
		updates: impl IntoIterator<Item = (&'a str, &'a str)>,
	) -> Result<Arc<SettingsView>> {
		let _guard = self.write.lock();
		let current = self.current.load_full();
		let catalog = current.catalog().clone();
		let next = Arc::new(catalog.apply_update(&current, updates)?);
		self.current.store(next.clone());
		Ok(next)
	}

	/// Re-derives the view from updated externally-owned metadata and
	/// publishes it.
	pub fn derive(&self, overrides: &Source) -> Result<Arc<SettingsView>> {
		let _guard = self.write.lock();
		let current = self.current.load_full();
		let catalog = current.catalog().clone();
		let next = Arc::new(catalog.derive_view(&current, overrides)?);
		self.current.store(next.clone());
		Ok(next)
	}
}

impl core::fmt::Debug for SettingsCell {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("SettingsCell")
			.field("current", &*self.current.load())
			.finish()
	}
}
