//! PubMed EFetch XML parser
//!
//! Walks an EFetch response (`<PubmedArticleSet>`) with a streaming
//! `quick_xml::Reader` and turns every `<PubmedArticle>` into an
//! [`ArticleRecord`], classifying authors with an [`AffiliationFilter`].
//!
//! # Module Organization
//!
//! - `reader` - `quick_xml::Reader` helpers (text collection, EOF errors)
//! - `extractors` - email and year extraction from free text
//!
//! Fields are located by element name anywhere below their parent, so the
//! parser accepts both the full MEDLINE layout
//! (`MedlineCitation/Article/Journal/JournalIssue/PubDate`) and flattened
//! documents that place `ArticleTitle` or `AuthorList` directly under
//! `MedlineCitation`.

mod extractors;
mod reader;

pub use extractors::extract_email_from_text;

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, instrument, warn};

use crate::error::{PapersError, Result};
use crate::filter::AffiliationFilter;
use crate::pubmed::models::{ArticleRecord, NonAcademicAuthor, UNKNOWN_DATE, UNKNOWN_TITLE};
use extractors::extract_year;
use reader::{make_reader, read_text_content, unexpected_eof};

/// Parse every article in an EFetch XML response
///
/// One [`ArticleRecord`] is produced per `<PubmedArticle>`, whether or not
/// any of its authors matched the filter. An empty (or whitespace-only)
/// body yields no records.
///
/// # Errors
///
/// Returns [`PapersError::XmlError`] for malformed XML: mismatched tags,
/// elements left open at end of input, invalid escapes, or a non-empty
/// body without any element.
///
/// # Example
///
/// ```
/// use papers_client::AffiliationFilter;
/// use papers_client::pubmed::parse_articles_from_xml;
///
/// let xml = br#"<PubmedArticleSet>
///   <PubmedArticle>
///     <MedlineCitation>
///       <PMID>12345678</PMID>
///       <ArticleTitle>Sample Title</ArticleTitle>
///     </MedlineCitation>
///   </PubmedArticle>
/// </PubmedArticleSet>"#;
///
/// let records = parse_articles_from_xml(xml, &AffiliationFilter::default())?;
/// assert_eq!(records[0].pmid, "12345678");
/// assert_eq!(records[0].publication_date, "Unknown Date");
/// # Ok::<(), papers_client::PapersError>(())
/// ```
#[instrument(skip(xml, filter), fields(xml_size = xml.len()))]
pub fn parse_articles_from_xml(xml: &[u8], filter: &AffiliationFilter) -> Result<Vec<ArticleRecord>> {
    if xml.iter().all(u8::is_ascii_whitespace) {
        debug!("Empty EFetch body, no articles to parse");
        return Ok(Vec::new());
    }

    let mut reader = make_reader(xml);
    let mut buf = Vec::new();
    let mut records = Vec::new();
    let mut open_elements: usize = 0;
    let mut saw_element = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                saw_element = true;
                if e.name().as_ref() == b"PubmedArticle" {
                    let article = read_article(&mut reader)?;
                    records.push(article.into_record(filter));
                } else {
                    open_elements += 1;
                }
            }
            Event::End(_) => open_elements = open_elements.saturating_sub(1),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_element {
        return Err(PapersError::XmlError(
            "document does not contain any element".to_string(),
        ));
    }

    if open_elements > 0 {
        return Err(PapersError::XmlError(format!(
            "unexpected end of document with {} unclosed element(s)",
            open_elements
        )));
    }

    debug!(articles = records.len(), "Parsed EFetch response");
    Ok(records)
}

/// Raw fields of one `<PubmedArticle>`
#[derive(Debug, Default)]
struct ArticleXml {
    pmid: Option<String>,
    title: Option<String>,
    year: Option<String>,
    authors: Vec<AuthorXml>,
}

/// Raw fields of one `<Author>`
#[derive(Debug, Default)]
struct AuthorXml {
    last_name: Option<String>,
    fore_name: Option<String>,
    collective_name: Option<String>,
    affiliations: Vec<String>,
    emails: Vec<String>,
}

impl ArticleXml {
    fn into_record(self, filter: &AffiliationFilter) -> ArticleRecord {
        let mut non_academic_authors = Vec::new();
        let mut emails = Vec::new();

        for author in &self.authors {
            if let Some(affiliation) = filter.first_match(&author.affiliations) {
                non_academic_authors.push(NonAcademicAuthor {
                    name: author.full_name(),
                    affiliation: affiliation.to_string(),
                });
            }
            emails.extend(author.contact_emails());
        }

        let pmid = non_blank(self.pmid).unwrap_or_else(|| {
            warn!("PubmedArticle without PMID");
            String::new()
        });

        debug!(
            pmid = %pmid,
            authors = self.authors.len(),
            non_academic = non_academic_authors.len(),
            emails = emails.len(),
            "Parsed article"
        );

        ArticleRecord {
            pmid,
            title: non_blank(self.title).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            publication_date: non_blank(self.year).unwrap_or_else(|| UNKNOWN_DATE.to_string()),
            non_academic_authors,
            corresponding_email: emails.into_iter().next(),
        }
    }
}

impl AuthorXml {
    /// `"<ForeName> <LastName>"`, falling back to `CollectiveName`
    fn full_name(&self) -> String {
        let parts: Vec<&str> = [self.fore_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect();

        if parts.is_empty() {
            self.collective_name.clone().unwrap_or_default()
        } else {
            parts.join(" ")
        }
    }

    /// `Email` elements, or addresses embedded in the affiliation text
    fn contact_emails(&self) -> Vec<String> {
        let explicit: Vec<String> = self
            .emails
            .iter()
            .filter(|e| !e.is_empty())
            .cloned()
            .collect();

        if !explicit.is_empty() {
            return explicit;
        }

        self.affiliations
            .iter()
            .filter_map(|a| extract_email_from_text(a))
            .collect()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Read a `<PubmedArticle>` up to its end tag
fn read_article(reader: &mut Reader<&[u8]>) -> Result<ArticleXml> {
    let mut buf = Vec::new();
    let mut article = ArticleXml::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"PMID" if article.pmid.is_none() => {
                    article.pmid = Some(read_text_content(reader, b"PMID")?);
                }
                b"ArticleTitle" if article.title.is_none() => {
                    article.title = Some(read_text_content(reader, b"ArticleTitle")?);
                }
                b"PubDate" => {
                    let year = read_pub_date(reader)?;
                    if article.year.is_none() {
                        article.year = year;
                    }
                }
                b"Author" => article.authors.push(read_author(reader)?),
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"PubmedArticle" => break,
            Event::Eof => return Err(unexpected_eof(b"PubmedArticle")),
            _ => {}
        }
        buf.clear();
    }

    Ok(article)
}

/// Read a `<PubDate>`, preferring `Year` over a free-form `MedlineDate`
fn read_pub_date(reader: &mut Reader<&[u8]>) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let mut year = None;
    let mut medline_date = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"Year" if year.is_none() => year = Some(read_text_content(reader, b"Year")?),
                b"MedlineDate" => {
                    medline_date = Some(read_text_content(reader, b"MedlineDate")?);
                }
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"PubDate" => break,
            Event::Eof => return Err(unexpected_eof(b"PubDate")),
            _ => {}
        }
        buf.clear();
    }

    Ok(non_blank(year).or_else(|| medline_date.as_deref().and_then(extract_year)))
}

fn read_author(reader: &mut Reader<&[u8]>) -> Result<AuthorXml> {
    let mut buf = Vec::new();
    let mut author = AuthorXml::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"LastName" => author.last_name = Some(read_text_content(reader, b"LastName")?),
                b"ForeName" => author.fore_name = Some(read_text_content(reader, b"ForeName")?),
                b"CollectiveName" => {
                    author.collective_name = Some(read_text_content(reader, b"CollectiveName")?);
                }
                b"Affiliation" => {
                    let text = read_text_content(reader, b"Affiliation")?;
                    if !text.is_empty() {
                        author.affiliations.push(text);
                    }
                }
                b"Email" => author.emails.push(read_text_content(reader, b"Email")?),
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"Author" => break,
            Event::Eof => return Err(unexpected_eof(b"Author")),
            _ => {}
        }
        buf.clear();
    }

    Ok(author)
}
