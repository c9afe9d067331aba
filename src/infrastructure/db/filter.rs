//! OR-composed substring-match filter expressions.
//!
//! The store accepts filters of the form
//! `title.ilike."%needle%",content.ilike."%needle%"` where the comma
//! separates OR clauses and double quotes delimit the pattern literal.
//! Because both characters carry structural meaning, every caller-supplied
//! pattern is quoted on composition with `"` and `\` backslash-escaped;
//! a search string can therefore never add clauses, change columns, or
//! break out of its own literal. The repository parses the expression
//! back (splitting only on unquoted commas) and applies it as a SQL OR
//! of LIKE conditions with bound parameters against a column whitelist.

use crate::domain::error::{AppError, Result};

/// Compose the prompt-search filter: case-insensitive substring match on
/// title or content.
pub fn search_filter(search: &str) -> String {
    let pattern = format!("%{}%", search);
    any_of(&[ilike("title", &pattern), ilike("content", &pattern)])
}

pub fn ilike(column: &str, pattern: &str) -> String {
    format!("{}.ilike.{}", column, quote_literal(pattern))
}

pub fn any_of(clauses: &[String]) -> String {
    clauses.join(",")
}

fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeClause {
    pub column: String,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrFilter {
    pub clauses: Vec<LikeClause>,
}

impl OrFilter {
    pub fn parse(expr: &str) -> Result<Self> {
        let mut clauses = Vec::new();
        for raw in split_clauses(expr)? {
            clauses.push(parse_clause(&raw)?);
        }
        if clauses.is_empty() {
            return Err(malformed(expr));
        }
        Ok(Self { clauses })
    }

    /// Translate into a parenthesized OR of LIKE conditions with `?`
    /// placeholders; bind values are returned separately so the caller
    /// never interpolates patterns into SQL text.
    pub fn to_sql(&self, allowed_columns: &[&str]) -> Result<(String, Vec<String>)> {
        let mut conditions = Vec::new();
        let mut binds = Vec::new();
        for clause in &self.clauses {
            if !allowed_columns.contains(&clause.column.as_str()) {
                return Err(AppError::Internal(format!(
                    "filter references unsupported column: {}",
                    clause.column
                )));
            }
            conditions.push(format!("{} LIKE ?", clause.column));
            binds.push(clause.pattern.clone());
        }
        Ok((format!("({})", conditions.join(" OR ")), binds))
    }
}

/// Split on commas that sit outside quoted literals.
fn split_clauses(expr: &str) -> Result<Vec<String>> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;
    for ch in expr.chars() {
        if in_quotes {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_quotes = false;
            }
            current.push(ch);
            continue;
        }
        match ch {
            ',' => parts.push(std::mem::take(&mut current)),
            '"' => {
                in_quotes = true;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }
    if in_quotes {
        return Err(malformed(expr));
    }
    parts.push(current);
    Ok(parts)
}

fn parse_clause(raw: &str) -> Result<LikeClause> {
    let trimmed = raw.trim();
    let (column, rest) = trimmed.split_once('.').ok_or_else(|| malformed(trimmed))?;
    let (op, value) = rest.split_once('.').ok_or_else(|| malformed(trimmed))?;
    if op != "ilike" {
        return Err(AppError::Internal(format!(
            "unsupported filter operator: {}",
            op
        )));
    }
    Ok(LikeClause {
        column: column.to_string(),
        pattern: unquote(value)?,
    })
}

fn unquote(value: &str) -> Result<String> {
    let Some(inner) = value.strip_prefix('"') else {
        // Bare literal: tolerated on input for compatibility, but the
        // composer always quotes.
        return Ok(value.to_string());
    };
    let inner = inner.strip_suffix('"').ok_or_else(|| malformed(value))?;
    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;
    for ch in inner.chars() {
        if escaped {
            out.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            return Err(malformed(value));
        } else {
            out.push(ch);
        }
    }
    if escaped {
        return Err(malformed(value));
    }
    Ok(out)
}

fn malformed(expr: &str) -> AppError {
    AppError::Internal(format!("malformed filter expression: {}", expr))
}
