use chrono::DateTime;
use chrono::Datelike;
use chrono::FixedOffset;
use chrono::Local;
use chrono::NaiveDateTime;
use log::warn;

use crate::errors::UtilError;

/// Interpreta datas no formato `AAAA-MM-DDTHH:MM`, com ou sem segundos.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime>
{
    if !value.contains('T') || !value.contains('-') || !value.contains(':')
    {
        return None;
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Rótulo `AAAA-MM` usado para agrupar arquivos por mês.
pub fn month_folder(datetime: &DateTime<Local>) -> String
{
    datetime.format("%Y-%m").to_string()
}

/// Consulta a hora do servidor com uma requisição HEAD e lê o header `Date`.
///
/// Se o relógio do servidor estiver atrasado em relação ao ano local, cai para
/// a hora local, que nesse caso é mais confiável.
pub async fn server_datetime(url: &str) -> Result<DateTime<FixedOffset>, UtilError>
{
    let client = reqwest::Client::new();
    let response = client.head(url).send().await?;

    let header = response
        .headers()
        .get(reqwest::header::DATE)
        .and_then(|value| value.to_str().ok())
        .ok_or(UtilError::MissingDateHeader)?;

    let server_time = DateTime::parse_from_rfc2822(header)?;

    let local_now = Local::now();
    if server_time.year() < local_now.year()
    {
        warn!(
            "Servidor reportou ano {} (local {}); usando a hora local",
            server_time.year(),
            local_now.year()
        );
        return Ok(local_now.fixed_offset());
    }

    Ok(server_time)
}
