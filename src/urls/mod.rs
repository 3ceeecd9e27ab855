use serde_json::json;
use serde_json::Value;
use url::Url;

use crate::errors::UtilError;

/// Busca o valor de um parâmetro da URL.
///
/// Primeiro procura na query string (`?nome=valor`); se não encontrar, tenta o
/// formato de rewrite por caminho (`/nome/valor/`).
pub fn get_query_string(url: &str, name: &str) -> Option<String>
{
    let parsed = Url::parse(url).ok()?;

    for (key, value) in parsed.query_pairs()
    {
        if key == name
        {
            return Some(value.into_owned());
        }
    }

    // Formato /nome/valor/ no caminho
    if let Some(segments) = parsed.path_segments()
    {
        let segments: Vec<&str> = segments.collect();
        for pair in segments.windows(2)
        {
            if pair[0] == name && !pair[1].is_empty()
            {
                return Some(pair[1].to_string());
            }
        }
    }

    None
}

/// Converte todos os parâmetros da query em um objeto JSON.
/// Chaves repetidas ficam com o último valor.
pub fn get_query_object(url: &str) -> Result<Value, UtilError>
{
    let parsed = Url::parse(url)?;
    let mut object = serde_json::Map::new();

    for (key, value) in parsed.query_pairs()
    {
        object.insert(key.into_owned(), json!(value.into_owned()));
    }

    Ok(Value::Object(object))
}

/// Troca o valor de um parâmetro da URL, ou acrescenta o parâmetro caso ele
/// ainda não exista. Os demais parâmetros são preservados na mesma ordem.
pub fn change_url_arg(url: &str, arg: &str, value: &str) -> Result<String, UtilError>
{
    let mut parsed = Url::parse(url)?;

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut replaced = false;
    {
        let mut editor = parsed.query_pairs_mut();
        editor.clear();
        for (key, old_value) in &pairs
        {
            if key == arg
            {
                editor.append_pair(key, value);
                replaced = true;
            }
            else
            {
                editor.append_pair(key, old_value);
            }
        }
        if !replaced
        {
            editor.append_pair(arg, value);
        }
    }

    Ok(parsed.to_string())
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn reads_value_from_query()
    {
        let url = "https://example.com/page?user=ana&id=42";
        assert_eq!(get_query_string(url, "user"), Some("ana".to_string()));
        assert_eq!(get_query_string(url, "id"), Some("42".to_string()));
        assert_eq!(get_query_string(url, "nada"), None);
    }

    #[test]
    fn reads_value_from_path_rewrite()
    {
        let url = "https://example.com/page/user/ana/";
        assert_eq!(get_query_string(url, "user"), Some("ana".to_string()));
    }

    #[test]
    fn decodes_percent_encoding()
    {
        let url = "https://example.com/?msg=ol%C3%A1%20mundo";
        assert_eq!(get_query_string(url, "msg"), Some("olá mundo".to_string()));
    }

    #[test]
    fn builds_query_object()
    {
        let value = get_query_object("https://example.com/?a=1&b=dois&a=3").unwrap();
        assert_eq!(value["a"], "3"); // última ocorrência vence
        assert_eq!(value["b"], "dois");
    }

    #[test]
    fn query_object_of_bare_url_is_empty()
    {
        let value = get_query_object("https://example.com/page").unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn replaces_existing_arg()
    {
        let out = change_url_arg("https://example.com/?a=1&b=2", "a", "9").unwrap();
        assert_eq!(out, "https://example.com/?a=9&b=2");
    }

    #[test]
    fn appends_missing_arg()
    {
        let out = change_url_arg("https://example.com/?a=1", "c", "3").unwrap();
        assert_eq!(out, "https://example.com/?a=1&c=3");

        let no_query = change_url_arg("https://example.com/page", "x", "1").unwrap();
        assert_eq!(no_query, "https://example.com/page?x=1");
    }

    #[test]
    fn rejects_invalid_url()
    {
        assert!(change_url_arg("::claramente-inválido::", "a", "1").is_err());
    }
}
