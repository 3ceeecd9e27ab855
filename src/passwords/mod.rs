use std::fs::OpenOptions;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::errors::UtilError;

/// Conjunto completo: letras, dígitos e os símbolos aceitos.
pub const MASTER_CHARSET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789~!@#$%^&*()";

/// Filtra o conjunto completo pelas classes habilitadas.
pub fn build_charset(letters: bool, digits: bool, symbols: bool) -> Result<String, UtilError>
{
    if !letters && !digits && !symbols
    {
        return Err(UtilError::EmptyCharset);
    }

    let charset: String = MASTER_CHARSET
        .chars()
        .filter(|c| {
            if c.is_ascii_alphabetic()
            {
                letters
            }
            else if c.is_ascii_digit()
            {
                digits
            }
            else
            {
                symbols
            }
        })
        .collect();

    Ok(charset)
}

/// Itera sobre todas as combinações de `length` posições do conjunto, em ordem
/// lexicográfica (produto cartesiano). Funciona como um odômetro: o índice mais
/// à direita gira primeiro. Nada é materializado além da senha corrente.
pub struct PasswordIter
{
    charset: Vec<char>,
    indices: Vec<usize>,
    done: bool,
}

impl PasswordIter
{
    pub fn new(charset: &str, length: usize) -> Self
    {
        let charset: Vec<char> = charset.chars().collect();
        let done = charset.is_empty() || length == 0;
        PasswordIter {
            charset,
            indices: vec![0; length],
            done,
        }
    }

    /// Quantidade total de combinações (len(charset) ^ length).
    pub fn total(&self) -> u128
    {
        (self.charset.len() as u128).pow(self.indices.len() as u32)
    }
}

impl Iterator for PasswordIter
{
    type Item = String;

    fn next(&mut self) -> Option<String>
    {
        if self.done
        {
            return None;
        }

        let current: String = self.indices.iter().map(|&i| self.charset[i]).collect();

        // avança o odômetro
        let mut position = self.indices.len();
        loop
        {
            if position == 0
            {
                self.done = true;
                break;
            }
            position -= 1;
            self.indices[position] += 1;
            if self.indices[position] < self.charset.len()
            {
                break;
            }
            self.indices[position] = 0;
        }

        Some(current)
    }
}

/// Escreve uma senha por linha no arquivo, em modo append.
/// Devolve quantas linhas foram escritas.
pub fn write_to_file<I>(passwords: I, path: &Path) -> Result<u64, UtilError>
where
    I: Iterator<Item = String>,
{
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);

    let mut written = 0u64;
    for password in passwords
    {
        writeln!(writer, "{}", password)?;
        written += 1;
    }
    writer.flush()?;

    info!("{} senhas escritas em {}", written, path.display());
    Ok(written)
}
