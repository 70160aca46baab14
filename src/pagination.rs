//! Sliding pagination windows synthesized from response metadata.
//!
//! Given the current page, the total page count, and the URL the request was sent to,
//! [`PaginationLinker`] rewrites the `page` query parameter to produce previous/next links, up
//! to five links on each side of the current page, and the ordered union of all of them.

// self
use crate::_prelude::*;

/// Query parameter carrying the page index.
pub const PAGE_PARAM: &str = "page";
/// Query parameter carrying the page size.
pub const TAKE_PARAM: &str = "take";
/// Maximum number of links on each side of the current page.
pub const WINDOW: u32 = 5;

/// Caller pagination request merged into the query of a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRequest {
	/// Requested page (1-based).
	pub page: u32,
	/// Requested page size.
	pub take: u32,
}
impl PageRequest {
	/// Default page.
	pub const DEFAULT_PAGE: u32 = 1;
	/// Default page size.
	pub const DEFAULT_TAKE: u32 = 12;

	/// Creates a request; zero values fall back to the defaults.
	pub fn new(page: u32, take: u32) -> Self {
		Self {
			page: if page == 0 { Self::DEFAULT_PAGE } else { page },
			take: if take == 0 { Self::DEFAULT_TAKE } else { take },
		}
	}

	/// Query pairs contributed by this request.
	pub fn query_pairs(&self) -> [(&'static str, String); 2] {
		[(PAGE_PARAM, self.page.to_string()), (TAKE_PARAM, self.take.to_string())]
	}
}
impl Default for PageRequest {
	fn default() -> Self {
		Self { page: Self::DEFAULT_PAGE, take: Self::DEFAULT_TAKE }
	}
}

/// Current position reported by the upstream `meta.pagination` section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaginationMeta {
	/// Current page (1-based).
	pub current_page: u32,
	/// Total number of pages.
	pub total_pages: u32,
}
impl PaginationMeta {
	/// Creates metadata; returns `None` when `current_page` is zero.
	pub fn new(current_page: u32, total_pages: u32) -> Option<Self> {
		(current_page >= 1).then_some(Self { current_page, total_pages })
	}

	/// Reads `pagination.current_page` and `pagination.total_pages` from a response `meta` object.
	///
	/// camelCase spellings and numeric strings are accepted as well.
	pub fn from_meta(meta: &Value) -> Option<Self> {
		let section = meta.get("pagination")?;
		let current = read_page(section, "current_page", "currentPage")?;
		let total = read_page(section, "total_pages", "totalPages").unwrap_or(0);

		Self::new(current, total)
	}
}

/// Page links surrounding the current page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLinks {
	/// Link to the preceding page, when one exists.
	pub previous: Option<Url>,
	/// Link to the following page, when one exists.
	pub next: Option<Url>,
	/// Up to [`WINDOW`] preceding pages, ascending.
	pub countdown: BTreeMap<u32, Url>,
	/// Up to [`WINDOW`] following pages, ascending.
	pub countup: BTreeMap<u32, Url>,
	/// Link to the current page.
	pub current: Url,
	/// `countdown`, the current page, and `countup`, ascending.
	pub full: BTreeMap<u32, Url>,
}

/// Computes [`PaginationLinks`] by rewriting one query parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationLinker {
	param: String,
	window: u32,
}
impl PaginationLinker {
	/// Creates a linker rewriting `param` with the default window.
	pub fn new(param: impl Into<String>) -> Self {
		Self { param: param.into(), window: WINDOW }
	}

	/// Overrides the number of links kept on each side of the current page.
	pub fn with_window(mut self, window: u32) -> Self {
		self.window = window;

		self
	}

	/// Builds the link window, or `None` when `url` carries no page parameter.
	pub fn link(&self, meta: PaginationMeta, url: &Url) -> Option<PaginationLinks> {
		if !url.query_pairs().any(|(key, _)| key == self.param.as_str()) {
			return None;
		}

		let current_page = meta.current_page;
		let total_pages = meta.total_pages;
		let rewrite = |page: u32| rewrite_page(url, page, &self.param);
		let first = current_page.saturating_sub(self.window).max(1);
		let last = current_page.saturating_add(self.window).min(total_pages);
		let countdown =
			(first..current_page).map(|page| (page, rewrite(page))).collect::<BTreeMap<_, _>>();
		let countup = (current_page.saturating_add(1)..=last)
			.map(|page| (page, rewrite(page)))
			.collect::<BTreeMap<_, _>>();
		let current = rewrite(current_page);
		let mut full = countdown.clone();

		full.insert(current_page, current.clone());
		full.extend(countup.iter().map(|(page, url)| (*page, url.clone())));

		Some(PaginationLinks {
			previous: (current_page > 1).then(|| rewrite(current_page - 1)),
			next: (current_page < total_pages).then(|| rewrite(current_page + 1)),
			countdown,
			countup,
			current,
			full,
		})
	}
}
impl Default for PaginationLinker {
	fn default() -> Self {
		Self::new(PAGE_PARAM)
	}
}

/// Returns a copy of `url` whose `param` query value is `page`.
///
/// Other pairs keep their order and values; the parameter is appended when missing.
pub fn rewrite_page(url: &Url, page: u32, param: &str) -> Url {
	let mut replaced = false;
	let mut pairs = Vec::new();

	for (key, value) in url.query_pairs() {
		if !replaced && key == param {
			replaced = true;
			pairs.push((key.into_owned(), page.to_string()));
		} else {
			pairs.push((key.into_owned(), value.into_owned()));
		}
	}

	if !replaced {
		pairs.push((param.to_owned(), page.to_string()));
	}

	let mut rewritten = url.clone();

	rewritten.query_pairs_mut().clear().extend_pairs(pairs);

	rewritten
}

fn read_page(section: &Value, snake: &str, camel: &str) -> Option<u32> {
	let value = section.get(snake).or_else(|| section.get(camel))?;
	let number = match value {
		Value::Number(number) => number.as_u64()?,
		Value::String(text) => text.trim().parse().ok()?,
		_ => return None,
	};

	u32::try_from(number).ok()
}
