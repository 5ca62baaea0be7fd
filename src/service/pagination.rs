//! Page arithmetic for list views.

use crate::error::AppError;
use crate::store::Window;
use serde::Serialize;

/// The `?page=` query value: a 1-based number or `last`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageRequest {
    Number(u64),
    Last,
}

impl PageRequest {
    /// Absent means the first page. Anything that is neither a number nor `last` is a missing page.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(PageRequest::Number(1)),
            Some("last") => Ok(PageRequest::Last),
            Some(s) => s
                .parse()
                .map(PageRequest::Number)
                .map_err(|_| AppError::NotFound(format!("invalid page: {}", s))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page {
    pub number: u64,
    pub num_pages: u64,
    pub per_page: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<u64>,
    pub next_page_number: Option<u64>,
}

impl Page {
    pub fn window(&self) -> Window {
        Window {
            limit: self.per_page,
            offset: (self.number - 1) * self.per_page,
        }
    }
}

/// Resolves `req` against `total` rows. An empty list still has one (empty) page.
pub fn paginate(total: u64, per_page: u64, req: PageRequest) -> Result<Page, AppError> {
    let per_page = per_page.max(1);
    let num_pages = total.div_ceil(per_page).max(1);
    let number = match req {
        PageRequest::Last => num_pages,
        PageRequest::Number(0) => {
            return Err(AppError::NotFound("page number is less than 1".into()));
        }
        PageRequest::Number(n) if n > num_pages => {
            return Err(AppError::NotFound(format!("page {} contains no results", n)));
        }
        PageRequest::Number(n) => n,
    };
    Ok(Page {
        number,
        num_pages,
        per_page,
        has_previous: number > 1,
        has_next: number < num_pages,
        previous_page_number: (number > 1).then(|| number - 1),
        next_page_number: (number < num_pages).then(|| number + 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_one_page() {
        let page = paginate(0, 10, PageRequest::Number(1)).unwrap();
        assert_eq!(page.num_pages, 1);
        assert!(!page.has_next && !page.has_previous);
        assert_eq!(page.window(), Window { limit: 10, offset: 0 });
    }

    #[test]
    fn middle_and_last_pages() {
        let page = paginate(25, 10, PageRequest::Number(2)).unwrap();
        assert_eq!(page.window(), Window { limit: 10, offset: 10 });
        assert_eq!(page.previous_page_number, Some(1));
        assert_eq!(page.next_page_number, Some(3));

        let last = paginate(25, 10, PageRequest::Last).unwrap();
        assert_eq!(last.number, 3);
        assert!(!last.has_next);
    }

    #[test]
    fn out_of_range_is_not_found() {
        assert!(matches!(paginate(25, 10, PageRequest::Number(4)), Err(AppError::NotFound(_))));
        assert!(matches!(paginate(25, 10, PageRequest::Number(0)), Err(AppError::NotFound(_))));
        assert!(matches!(PageRequest::parse(Some("two")), Err(AppError::NotFound(_))));
        assert_eq!(PageRequest::parse(None).unwrap(), PageRequest::Number(1));
        assert_eq!(PageRequest::parse(Some("last")).unwrap(), PageRequest::Last);
    }
}
