use crate::{
    domain::{statement, Member},
    ports::statement::{Error, StatementPort},
};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Flat-file statement sink.
///
/// Records are appended to a single text file; the column header is
/// written only when the file is missing or empty, so repeated exports
/// keep one header at the top.
#[derive(Clone, Debug)]
pub struct FileStatement {
    path: PathBuf,
}

impl FileStatement {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl StatementPort for FileStatement {
    async fn append_records(&self, members: Vec<Member>) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let existing_len = match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => metadata.len(),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => 0,
            Err(err) => return Err(err.into()),
        };

        let mut contents = String::new();
        if existing_len == 0 {
            contents.push_str(&statement::header());
            contents.push('\n');
        }
        for member in &members {
            contents.push_str(&statement::format_record(member));
            contents.push('\n');
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(contents.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(
            path = %self.path.display(),
            records = members.len(),
            "statement records appended"
        );
        Ok(())
    }

    async fn read_lines(&self) -> Result<Vec<String>, Error> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NoStatement)
            }
            Err(err) => return Err(err.into()),
        };
        if contents.is_empty() {
            return Err(Error::NoStatement);
        }
        Ok(contents.lines().map(str::to_owned).collect())
    }
}

/// We need to create a custom `From` implementation here for an error that's specific to this
/// adapter.
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Adapter(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MemberProfile;
    use speculoos::prelude::*;
    use uuid::Uuid;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join("gym-membership-service-tests")
            .join(format!("{}.txt", Uuid::new_v4()))
    }

    fn profile() -> MemberProfile {
        MemberProfile {
            name: "Asha Rai".to_string(),
            location: "Kathmandu".to_string(),
            phone: "9841000000".to_string(),
            email: "asha@example.com".to_string(),
            gender: "Female".to_string(),
            date_of_birth: "1994-03-12".to_string(),
            membership_start_date: "2024-01-01".to_string(),
        }
    }

    #[tokio::test]
    async fn test_append_then_read_back() {
        let sink = FileStatement::new(scratch_path());
        let member = Member::new_regular(1, profile(), "Walk-in");

        let res = sink.append_records(vec![member.clone()]).await;
        assert_that!(res).is_ok();

        let lines = sink.read_lines().await.unwrap();
        assert_that!(lines).has_length(2);
        assert_that!(lines[0].as_str()).contains("ID");
        assert_that!(lines[1].as_str()).is_equal_to(statement::format_record(&member).as_str());

        tokio::fs::remove_file(sink.path()).await.unwrap();
    }

    #[tokio::test]
    async fn test_header_written_once_across_appends() {
        let sink = FileStatement::new(scratch_path());
        let member = Member::new_premium(2, profile(), "Bikash Gurung");

        sink.append_records(vec![member.clone()]).await.unwrap();
        sink.append_records(vec![member]).await.unwrap();

        let lines = sink.read_lines().await.unwrap();
        assert_that!(lines).has_length(3);
        let header_count = lines.iter().filter(|l| l.starts_with("ID")).count();
        assert_that!(header_count).is_equal_to(1);

        tokio::fs::remove_file(sink.path()).await.unwrap();
    }

    #[tokio::test]
    async fn test_read_back_without_statement() {
        let sink = FileStatement::new(scratch_path());
        let res = sink.read_lines().await;
        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::NoStatement));
    }
}
