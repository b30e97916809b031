//! Compile filter trees and search requests to parameterised
//! PostgreSQL + pgvector statements.
//!
//! Compilation is pure: the caller owns the connection and binds
//! `params` positionally to `$1..$n`.

use talent_core::models::{EmbeddingField, FilterExpr, KeywordQuery};

/// Columns selected for every candidate row.
pub const CANDIDATE_COLUMNS: &str = "id, name, email, phone, title, company, location, \
     years_experience, salary_expectation, remote_preference, skills, summary";

pub const CANDIDATE_TABLE: &str = "candidates";

/// A bound value for a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Float(f64),
    Text(String),
    Vector(Vec<f32>),
}

/// A statement or clause together with its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSql {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

struct Compiler {
    params: Vec<SqlParam>,
}

impl Compiler {
    fn new() -> Self {
        Self { params: Vec::new() }
    }

    fn bind(&mut self, param: SqlParam) -> String {
        self.params.push(param);
        format!("${}", self.params.len())
    }

    fn filter(&mut self, expr: &FilterExpr) -> String {
        match expr {
            FilterExpr::Always => "TRUE".to_string(),
            FilterExpr::And(clauses) => self.join(clauses, " AND ", "TRUE"),
            FilterExpr::Or(clauses) => self.join(clauses, " OR ", "FALSE"),
            FilterExpr::ExperienceRange { min, max } => {
                let lo = self.bind(SqlParam::Float(*min));
                let hi = self.bind(SqlParam::Float(*max));
                format!("years_experience BETWEEN {lo} AND {hi}")
            }
            FilterExpr::LocationContains(needle) => {
                let p = self.bind(SqlParam::Text(like_pattern(needle)));
                format!("location ILIKE {p}")
            }
            FilterExpr::RemotePreferred => "lower(remote_preference) = 'remote'".to_string(),
            FilterExpr::HasSkill(skill) => {
                let p = self.bind(SqlParam::Text(skill.clone()));
                skill_member(&p)
            }
            FilterExpr::HasEmbedding(field) => format!("{} IS NOT NULL", field.column()),
        }
    }

    fn join(&mut self, clauses: &[FilterExpr], sep: &str, empty: &str) -> String {
        if clauses.is_empty() {
            return empty.to_string();
        }
        let parts: Vec<String> = clauses.iter().map(|c| self.filter(c)).collect();
        format!("({})", parts.join(sep))
    }

    fn keyword(&mut self, query: &KeywordQuery) -> String {
        let mut parts = Vec::new();
        for token in &query.tokens {
            let p = self.bind(SqlParam::Text(like_pattern(token)));
            parts.push(format!("title ILIKE {p} OR summary ILIKE {p}"));
        }
        for skill in &query.skill_tokens {
            let p = self.bind(SqlParam::Text(skill.clone()));
            parts.push(skill_member(&p));
        }
        if parts.is_empty() {
            "FALSE".to_string()
        } else {
            format!("({})", parts.join(" OR "))
        }
    }
}

fn skill_member(placeholder: &str) -> String {
    format!("EXISTS (SELECT 1 FROM unnest(skills) AS s WHERE lower(s) = lower({placeholder}))")
}

/// `%needle%` with LIKE metacharacters escaped.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Compile a filter tree to a WHERE-clause fragment.
pub fn compile_filter(expr: &FilterExpr) -> CompiledSql {
    let mut c = Compiler::new();
    let sql = c.filter(expr);
    CompiledSql {
        sql,
        params: c.params,
    }
}

/// Nearest neighbours on one embedding column by cosine distance.
///
/// Selects `1 - (column <=> $1)` as `similarity`; ties ordered by id.
pub fn vector_similarity_query(
    field: EmbeddingField,
    query_vector: &[f32],
    filter: &FilterExpr,
    limit: usize,
) -> CompiledSql {
    let mut c = Compiler::new();
    let vec_param = c.bind(SqlParam::Vector(query_vector.to_vec()));
    let column = field.column();
    let where_clause = c.filter(filter);
    let limit_param = c.bind(SqlParam::Int(limit as i64));
    let sql = format!(
        "SELECT {CANDIDATE_COLUMNS}, 1 - ({column} <=> {vec_param}) AS similarity \
         FROM {CANDIDATE_TABLE} \
         WHERE {column} IS NOT NULL AND {where_clause} \
         ORDER BY {column} <=> {vec_param}, id \
         LIMIT {limit_param}"
    );
    CompiledSql {
        sql,
        params: c.params,
    }
}

/// Boolean OR keyword match over title, summary, and skills.
pub fn keyword_query(query: &KeywordQuery, filter: &FilterExpr, limit: usize) -> CompiledSql {
    let mut c = Compiler::new();
    let match_clause = c.keyword(query);
    let where_clause = c.filter(filter);
    let limit_param = c.bind(SqlParam::Int(limit as i64));
    let sql = format!(
        "SELECT {CANDIDATE_COLUMNS} FROM {CANDIDATE_TABLE} \
         WHERE {match_clause} AND {where_clause} \
         ORDER BY id \
         LIMIT {limit_param}"
    );
    CompiledSql {
        sql,
        params: c.params,
    }
}
