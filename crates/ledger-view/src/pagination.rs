use std::ops::Range;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageInputError {
    #[error("Page number must be numeric, got '{0}'")]
    NotANumber(String),
    #[error("Page number must be a whole number, got '{0}'")]
    Fractional(String),
    #[error("Rows per page must be one of 20, 50, 100 or 500, got {0}")]
    UnsupportedPageSize(usize),
}

/// Rows per page offered to the operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageSize {
    Twenty,
    #[default]
    Fifty,
    Hundred,
    FiveHundred,
}

impl PageSize {
    pub const ALL: [Self; 4] = [Self::Twenty, Self::Fifty, Self::Hundred, Self::FiveHundred];

    pub const fn rows(self) -> usize {
        match self {
            Self::Twenty => 20,
            Self::Fifty => 50,
            Self::Hundred => 100,
            Self::FiveHundred => 500,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = PageInputError;

    fn try_from(rows: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|size| size.rows() == rows)
            .ok_or(PageInputError::UnsupportedPageSize(rows))
    }
}

/// `ceil(count / page_size)`, which is 0 for an empty list.
pub const fn total_pages(count: usize, page_size: PageSize) -> usize {
    count.div_ceil(page_size.rows())
}

/// 1-based page cursor over a list whose length is supplied per call, since
/// the filtered list it pages over changes underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: PageSize,
    current_page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl Paginator {
    pub const fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            current_page: 1,
        }
    }

    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    pub const fn total_pages(&self, count: usize) -> usize {
        total_pages(count, self.page_size)
    }

    /// Index range of the current page, clamped to `count`. A page past the
    /// end (the list shrank) yields an empty range.
    pub fn visible_range(&self, count: usize) -> Range<usize> {
        let rows = self.page_size.rows();
        let start = (self.current_page - 1).saturating_mul(rows);
        let end = start.saturating_add(rows);
        start.min(count)..end.min(count)
    }

    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.visible_range(items.len())]
    }

    /// Switches the page size; a different size goes back to page 1.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        if self.page_size != page_size {
            self.page_size = page_size;
            self.reset();
        }
    }

    pub const fn reset(&mut self) {
        self.current_page = 1;
    }

    // Navigation returns whether the cursor moved.

    pub const fn first_page(&mut self) -> bool {
        self.move_to(1)
    }

    pub const fn previous_page(&mut self) -> bool {
        if self.current_page <= 1 {
            return false;
        }
        self.move_to(self.current_page - 1)
    }

    pub const fn next_page(&mut self, total_pages: usize) -> bool {
        if self.current_page >= total_pages {
            return false;
        }
        self.move_to(self.current_page + 1)
    }

    pub const fn last_page(&mut self, total_pages: usize) -> bool {
        if total_pages == 0 {
            return false;
        }
        self.move_to(total_pages)
    }

    /// Moves to `page` clamped into `[1, total_pages]`; no-op without pages.
    pub fn jump_to_page(&mut self, page: i64, total_pages: usize) -> bool {
        if total_pages == 0 {
            return false;
        }
        let last = i64::try_from(total_pages).unwrap_or(i64::MAX);
        let target = page.clamp(1, last) as usize;
        self.move_to(target)
    }

    /// Parses operator input (`"7"`, `" 3 "`, `"4.0"`) and jumps to it.
    /// Non-numeric or fractional input is rejected and leaves the cursor
    /// untouched.
    pub fn jump_to_input(
        &mut self,
        input: &str,
        total_pages: usize,
    ) -> Result<usize, PageInputError> {
        let page = parse_page_number(input)?;
        self.jump_to_page(page, total_pages);
        Ok(self.current_page)
    }

    const fn move_to(&mut self, page: usize) -> bool {
        if self.current_page == page {
            return false;
        }
        self.current_page = page;
        true
    }
}

fn parse_page_number(input: &str) -> Result<i64, PageInputError> {
    let trimmed = input.trim();
    if let Ok(page) = trimmed.parse::<i64>() {
        return Ok(page);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => {
            Ok(value.clamp(i64::MIN as f64, i64::MAX as f64) as i64)
        }
        Ok(value) if value.is_finite() => Err(PageInputError::Fractional(trimmed.to_string())),
        _ => Err(PageInputError::NotANumber(trimmed.to_string())),
    }
}
