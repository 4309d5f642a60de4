use std::{fs::File, io, path::Path};

use anyhow::{Context, bail};
use chrono::Utc;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::{
    entities::{csv_import, movie},
    models::MovieInput,
};

/// Column order of the bulk input file, after its header row.
pub const COLUMNS: [&str; 8] =
    ["year", "title", "origin_ethnicity", "directors", "cast", "genre", "wiki_url", "plot"];

/// Rows per `insert_many`. Nine bound values per row keeps a full batch under
/// SQLite's 32766 variable limit.
pub const MAX_BATCH_SIZE: usize = 3000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImportOutcome {
    Imported { rows: u64 },
    AlreadyImported { rows: u64 },
    Missing,
}

/// Loads the CSV into the movie table unless this exact file was loaded before.
///
/// The whole file goes in under one transaction together with its marker row,
/// so a failed import leaves neither rows nor marker behind.
pub async fn import_csv(
    db: &DatabaseConnection,
    path: &Path,
    batch_size: usize,
) -> anyhow::Result<ImportOutcome> {
    if !path.exists() {
        warn!(path = %path.display(), "movie CSV not found, skipping import");
        return Ok(ImportOutcome::Missing);
    }

    let digest = file_sha256(path).with_context(|| format!("hashing {}", path.display()))?;

    let previous = csv_import::Entity::find()
        .filter(csv_import::Column::Sha256.eq(digest.as_str()))
        .one(db)
        .await?;
    if let Some(previous) = previous {
        info!(
            path = %path.display(),
            rows = previous.row_count,
            imported_at = %previous.imported_at,
            "movie CSV already imported"
        );
        return Ok(ImportOutcome::AlreadyImported { rows: previous.row_count as u64 });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let txn = db.begin().await?;
    let batch_size = batch_size.clamp(1, MAX_BATCH_SIZE);
    let mut batch = Vec::with_capacity(batch_size);
    let mut rows = 0u64;

    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let input = parse_record(&record).with_context(|| format!("CSV line {line}"))?;
        batch.push(input.into_active_model());

        if batch.len() == batch_size {
            rows += insert_batch(&txn, &mut batch).await?;
        }
    }
    rows += insert_batch(&txn, &mut batch).await?;

    let marker = csv_import::ActiveModel {
        id: Default::default(),
        source: Set(path.display().to_string()),
        sha256: Set(digest),
        row_count: Set(rows as i64),
        imported_at: Set(Utc::now()),
    };
    csv_import::Entity::insert(marker).exec(&txn).await?;

    txn.commit().await?;

    debug!(path = %path.display(), rows, "movie CSV committed");
    Ok(ImportOutcome::Imported { rows })
}

async fn insert_batch<C: ConnectionTrait>(
    conn: &C,
    batch: &mut Vec<movie::ActiveModel>,
) -> anyhow::Result<u64> {
    if batch.is_empty() {
        return Ok(0);
    }
    let n = batch.len() as u64;
    movie::Entity::insert_many(batch.drain(..)).exec(conn).await?;
    debug!(rows = n, "inserted batch");
    Ok(n)
}

fn parse_record(record: &csv::StringRecord) -> anyhow::Result<MovieInput> {
    if record.len() != COLUMNS.len() {
        bail!("expected {} columns, found {}", COLUMNS.len(), record.len());
    }

    // Cells are stored as written; trimming only decides blankness.
    let cell = |i: usize| record.get(i).unwrap_or_default();
    let optional = |i: usize| Some(cell(i)).filter(|v| !v.trim().is_empty()).map(str::to_string);
    let required = |i: usize| {
        let value = cell(i);
        if value.trim().is_empty() {
            bail!("{} is empty", COLUMNS[i]);
        }
        Ok(value.to_string())
    };

    let year = match cell(0).trim() {
        "" => None,
        raw => Some(raw.parse::<i32>().with_context(|| format!("year {raw:?}"))?),
    };

    Ok(MovieInput {
        year,
        title: required(1)?,
        origin_ethnicity: required(2)?,
        directors: optional(3),
        cast: optional(4),
        genre: required(5)?,
        wiki_url: required(6)?,
        plot: optional(7),
    })
}

fn file_sha256(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use sea_orm::PaginatorTrait;

    use super::*;
    use crate::db::test_db;

    const HEADER: &str = "Release Year,Title,Origin/Ethnicity,Director,Cast,Genre,Wiki Page,Plot\n";

    fn write_csv(dir: &Path, name: &str, rows: &[&str]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        path
    }

    async fn movie_count(db: &DatabaseConnection) -> u64 {
        movie::Entity::find().count(db).await.unwrap()
    }

    #[tokio::test]
    async fn imports_every_row_across_batches() {
        let (dir, db) = test_db().await;
        let rows: Vec<String> = (0..7)
            .map(|i| format!("{},Film {i},American,,,drama,https://example.org/{i},", 1950 + i))
            .collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let path = write_csv(dir.path(), "movies.csv", &rows);

        let outcome = import_csv(&db, &path, 3).await.unwrap();
        assert_eq!(outcome, ImportOutcome::Imported { rows: 7 });
        assert_eq!(movie_count(&db).await, 7);
    }

    #[tokio::test]
    async fn reimporting_the_same_file_is_a_no_op() {
        let (dir, db) = test_db().await;
        let path = write_csv(dir.path(), "movies.csv", &[
            "1954,Seven Samurai,Japanese,Akira Kurosawa,Toshiro Mifune,drama,https://en.wikipedia.org/wiki/Seven_Samurai,\"Farmers hire samurai, who defend the village.\"",
            "1950,Rashomon,Japanese,Akira Kurosawa,Toshiro Mifune,crime,https://en.wikipedia.org/wiki/Rashomon,",
        ]);

        assert_eq!(import_csv(&db, &path, 1000).await.unwrap(), ImportOutcome::Imported { rows: 2 });
        assert_eq!(
            import_csv(&db, &path, 1000).await.unwrap(),
            ImportOutcome::AlreadyImported { rows: 2 }
        );
        assert_eq!(movie_count(&db).await, 2);
    }

    #[tokio::test]
    async fn imported_row_keeps_its_values() {
        let (dir, db) = test_db().await;
        let path = write_csv(dir.path(), "movies.csv", &[
            "1954,Seven Samurai,Japanese,Akira Kurosawa,Toshiro Mifune,drama,https://en.wikipedia.org/wiki/Seven_Samurai,...",
        ]);
        import_csv(&db, &path, 1000).await.unwrap();

        let row = movie::Entity::find().one(&db).await.unwrap().unwrap();
        assert_eq!(row.year, Some(1954));
        assert_eq!(row.title, "Seven Samurai");
        assert_eq!(row.origin_ethnicity, "Japanese");
        assert_eq!(row.directors.as_deref(), Some("Akira Kurosawa"));
        assert_eq!(row.cast.as_deref(), Some("Toshiro Mifune"));
        assert_eq!(row.genre, "drama");
        assert_eq!(row.wiki_url, "https://en.wikipedia.org/wiki/Seven_Samurai");
        assert_eq!(row.plot.as_deref(), Some("..."));
    }

    #[tokio::test]
    async fn oversized_batch_size_is_capped() {
        let (dir, db) = test_db().await;
        let rows: Vec<String> = (0..4000)
            .map(|i| format!("1999,Film {i},American,,,drama,https://example.org/{i},"))
            .collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let path = write_csv(dir.path(), "movies.csv", &rows);

        let outcome = import_csv(&db, &path, 100_000).await.unwrap();
        assert_eq!(outcome, ImportOutcome::Imported { rows: 4000 });
        assert_eq!(movie_count(&db).await, 4000);
    }

    #[tokio::test]
    async fn cell_values_are_stored_verbatim() {
        let (dir, db) = test_db().await;
        let path = write_csv(dir.path(), "movies.csv", &[
            "1954,  Seven Samurai ,Japanese, Akira Kurosawa,,drama ,https://en.wikipedia.org/wiki/Seven_Samurai,\"Farmers hire samurai.  \"",
        ]);
        import_csv(&db, &path, 1000).await.unwrap();

        let row = movie::Entity::find().one(&db).await.unwrap().unwrap();
        assert_eq!(row.title, "  Seven Samurai ");
        assert_eq!(row.directors.as_deref(), Some(" Akira Kurosawa"));
        assert_eq!(row.genre, "drama ");
        assert_eq!(row.plot.as_deref(), Some("Farmers hire samurai.  "));
    }

    #[tokio::test]
    async fn empty_optional_cells_become_null() {
        let (dir, db) = test_db().await;
        let path = write_csv(dir.path(), "movies.csv", &[
            ",Untitled,American,,,unknown,https://example.org/untitled,",
        ]);
        import_csv(&db, &path, 1000).await.unwrap();

        let row = movie::Entity::find().one(&db).await.unwrap().unwrap();
        assert_eq!(row.year, None);
        assert_eq!(row.directors, None);
        assert_eq!(row.cast, None);
        assert_eq!(row.plot, None);
    }

    #[tokio::test]
    async fn bad_row_rolls_back_the_whole_import() {
        let (dir, db) = test_db().await;
        let path = write_csv(dir.path(), "movies.csv", &[
            "1954,Seven Samurai,Japanese,,,drama,https://en.wikipedia.org/wiki/Seven_Samurai,",
            "nineteen,Ikiru,Japanese,,,drama,https://en.wikipedia.org/wiki/Ikiru,",
        ]);

        let err = import_csv(&db, &path, 1).await.unwrap_err();
        assert!(format!("{err:#}").contains("CSV line 3"), "{err:#}");
        assert_eq!(movie_count(&db).await, 0);
        assert_eq!(csv_import::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_file_is_skipped() {
        let (dir, db) = test_db().await;
        let outcome = import_csv(&db, &dir.path().join("absent.csv"), 1000).await.unwrap();
        assert_eq!(outcome, ImportOutcome::Missing);
    }
}
