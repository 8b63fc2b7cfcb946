// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Parsing of typed page selections such as "1-3, 5; 6-8".

use blattwerk_document::SplitMode;

/// Parse one comma-separated selection of 1-based pages and ranges into
/// 0-based indices, in the order written.
pub fn parse_selection(text: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let mut pages = Vec::new();
    for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (start, end) = match part.split_once('-') {
            Some((a, b)) => (parse_page(a, page_count)?, parse_page(b, page_count)?),
            None => {
                let page = parse_page(part, page_count)?;
                (page, page)
            }
        };
        if start <= end {
            pages.extend(start..=end);
        } else {
            pages.extend((end..=start).rev());
        }
    }
    Ok(pages)
}

/// Parse the split field: `;` separates groups. One group means a single
/// output.
pub fn parse_split(text: &str, page_count: usize) -> Result<SplitMode, String> {
    let groups = text
        .split(';')
        .map(|group| parse_selection(group, page_count))
        .collect::<Result<Vec<_>, _>>()?;

    if groups.len() <= 1 {
        Ok(SplitMode::Single {
            pages: groups.into_iter().next().unwrap_or_default(),
        })
    } else {
        Ok(SplitMode::Multiple { groups })
    }
}

fn parse_page(text: &str, page_count: usize) -> Result<usize, String> {
    let page: usize = text
        .trim()
        .parse()
        .map_err(|_| format!("\"{}\" is not a page number", text.trim()))?;
    if page == 0 || page > page_count {
        return Err(format!("page {page} is outside 1-{page_count}"));
    }
    Ok(page - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singles_and_ranges() {
        assert_eq!(parse_selection("1, 3-5", 6).unwrap(), vec![0, 2, 3, 4]);
    }

    #[test]
    fn descending_range_keeps_written_order() {
        assert_eq!(parse_selection("4-2", 4).unwrap(), vec![3, 2, 1]);
    }

    #[test]
    fn out_of_range_pages_are_rejected() {
        assert!(parse_selection("0", 3).is_err());
        assert!(parse_selection("2-9", 3).is_err());
        assert!(parse_selection("two", 3).is_err());
    }

    #[test]
    fn blank_field_is_an_empty_single_selection() {
        assert_eq!(
            parse_split("  ", 3).unwrap(),
            SplitMode::Single { pages: vec![] }
        );
    }

    #[test]
    fn semicolons_make_groups() {
        assert_eq!(
            parse_split("1-2; ; 3", 3).unwrap(),
            SplitMode::Multiple {
                groups: vec![vec![0, 1], vec![], vec![2]]
            }
        );
    }
}
