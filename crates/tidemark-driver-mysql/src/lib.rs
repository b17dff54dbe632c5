mod value;
pub(crate) use value::Value;

use mysql_async::{
    prelude::{Protocol, Queryable, ToValue},
    Conn, Pool, QueryResult,
};
use tidemark_core::{async_trait, driver::Response, Attributes, Error, Result};
use url::Url;

/// MySQL error code for a duplicate entry on a unique or primary key.
const ER_DUP_ENTRY: u16 = 1062;

#[derive(Debug)]
pub struct MySQL {
    pool: Pool,
}

impl MySQL {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(anyhow::Error::from)?;

        if url.scheme() != "mysql" {
            return Err(anyhow::anyhow!(
                "connection url does not have a `mysql` scheme; url={}",
                url
            )
            .into());
        }

        url.host_str()
            .ok_or_else(|| anyhow::anyhow!("missing host in connection URL; url={}", url))?;

        if url.path().is_empty() || url.path() == "/" {
            return Err(anyhow::anyhow!(
                "no database specified - missing path in connection URL; url={}",
                url
            )
            .into());
        }

        let opts = mysql_async::Opts::from_url(url.as_ref()).map_err(Error::driver)?;
        let opts = mysql_async::OptsBuilder::from_opts(opts).client_found_rows(true);

        let pool = Pool::new(opts);
        Ok(Self { pool })
    }
}

impl From<Pool> for MySQL {
    fn from(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl tidemark_core::Driver for MySQL {
    async fn connect(&self) -> Result<Box<dyn tidemark_core::Connection>> {
        let conn = self.pool.get_conn().await.map_err(map_error)?;
        Ok(Box::new(Connection::new(conn)))
    }
}

#[derive(Debug)]
pub struct Connection {
    conn: Conn,
}

impl Connection {
    pub fn new(conn: Conn) -> Self {
        Self { conn }
    }
}

impl From<Conn> for Connection {
    fn from(conn: Conn) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl tidemark_core::Connection for Connection {
    async fn exec(&mut self, sql: &str, params: Vec<tidemark_core::Value>) -> Result<Response> {
        tracing::trace!(sql, params = params.len(), "mysql exec");

        // Statements without parameters go over the text protocol, which
        // accepts DDL and `SHOW` that cannot be prepared.
        if params.is_empty() {
            let result = self.conn.query_iter(sql).await.map_err(map_error)?;
            return collect(result).await;
        }

        let args = params
            .into_iter()
            .map(|param| Value::from(param).to_value())
            .collect::<Vec<_>>();

        let result = self
            .conn
            .exec_iter(sql, mysql_async::Params::Positional(args))
            .await
            .map_err(map_error)?;

        collect(result).await
    }
}

async fn collect<P: Protocol>(mut result: QueryResult<'_, 'static, P>) -> Result<Response> {
    let rows: Vec<mysql_async::Row> = result.collect().await.map_err(map_error)?;

    let rows = rows
        .into_iter()
        .map(|mut row| {
            let names = row
                .columns_ref()
                .iter()
                .map(|column| column.name_str().into_owned())
                .collect::<Vec<_>>();

            let mut record = Attributes::new();
            for (i, name) in names.into_iter().enumerate() {
                let value = row
                    .take::<mysql_async::Value, usize>(i)
                    .map(Value::from_sql)
                    .unwrap_or(tidemark_core::Value::Null);
                record.insert(name, value);
            }
            record
        })
        .collect();

    Ok(Response {
        rows,
        affected_rows: result.affected_rows(),
        insert_id: result.last_insert_id(),
    })
}

fn map_error(err: mysql_async::Error) -> Error {
    match &err {
        mysql_async::Error::Server(server) if server.code == ER_DUP_ENTRY => {
            Error::duplicate_key(server.message.clone())
        }
        _ => Error::driver(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_other_schemes() {
        let err = MySQL::new("postgresql://localhost/app").unwrap_err();
        assert!(err.to_string().contains("`mysql` scheme"), "{err}");
    }

    #[test]
    fn requires_a_database() {
        let err = MySQL::new("mysql://localhost").unwrap_err();
        assert!(err.to_string().contains("no database specified"), "{err}");
    }

    #[test]
    fn rejects_garbage() {
        assert!(MySQL::new("not a url").is_err());
    }

    #[test]
    fn duplicate_entry_maps_to_duplicate_key() {
        let server = mysql_async::ServerError {
            code: ER_DUP_ENTRY,
            message: "Duplicate entry 'user' for key 'PRIMARY'".into(),
            state: "23000".into(),
        };
        let err = map_error(mysql_async::Error::Server(server));
        assert!(err.is_duplicate_key());

        let server = mysql_async::ServerError {
            code: 1146,
            message: "Table 'app.user' doesn't exist".into(),
            state: "42S02".into(),
        };
        let err = map_error(mysql_async::Error::Server(server));
        assert!(err.is_driver());
    }
}
