use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use colored::*;
use dotenv::dotenv;
use log::warn;

use rust_utils::collections;
use rust_utils::dates;
use rust_utils::files;
use rust_utils::net;
use rust_utils::passwords;
use rust_utils::passwords::PasswordIter;
use rust_utils::random;
use rust_utils::strings;
use rust_utils::urls;

#[derive(Parser, Debug)]
#[clap(name = "rust-utils", about = "Coleção de utilitários de linha de comando")]
struct Args
{
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command
{
    /// Inverte um texto
    Reverse
    {
        text: String,
    },

    /// Remove valores repetidos mantendo a ordem original
    Dedup
    {
        values: Vec<String>,
    },

    /// Resolve o IP do cliente a partir dos headers de proxy reverso
    ClientIp
    {
        /// Conteúdo do header X-Forwarded-For
        #[clap(long)]
        forwarded_for: Option<String>,

        /// Conteúdo do header X-Real-Ip
        #[clap(long)]
        real_ip: Option<String>,

        /// Endereço remoto da conexão (host:porta)
        #[clap(long)]
        remote_addr: String,
    },

    /// Lê parâmetros de uma URL (um específico ou todos como JSON)
    Query
    {
        url: String,
        name: Option<String>,
    },

    /// Troca ou acrescenta um parâmetro de uma URL
    SetArg
    {
        url: String,
        arg: String,
        value: String,
    },

    /// Consulta a hora de um servidor HTTP pelo header Date
    ServerTime
    {
        url: String,
    },

    /// Move arquivos para subpastas AAAA-MM pela data de modificação
    Organize
    {
        src: PathBuf,
        dst: PathBuf,
    },

    /// Gera todas as combinações de senha e grava uma por linha
    GenPasswords
    {
        /// Arquivo de saída (modo append)
        output: PathBuf,

        /// Comprimento das senhas
        #[clap(short, long, default_value = "4")]
        length: usize,

        /// Inclui letras no conjunto
        #[clap(long)]
        letters: bool,

        /// Inclui dígitos no conjunto
        #[clap(long)]
        digits: bool,

        /// Inclui símbolos no conjunto
        #[clap(long)]
        symbols: bool,

        /// Reparte o arquivo final em pedaços deste tamanho (bytes)
        #[clap(long)]
        split_max: Option<u64>,
    },

    /// Reparte um arquivo em pedaços numerados
    Split
    {
        path: PathBuf,

        /// Tamanho máximo de cada pedaço em bytes (padrão 5 MB)
        #[clap(long, default_value = "5242880")]
        max_size: u64,
    },

    /// Sorteia números únicos dentro de um intervalo
    Random
    {
        #[clap(long, default_value = "1")]
        start: i64,

        #[clap(long, default_value = "27")]
        end: i64,

        #[clap(long, default_value = "5")]
        count: usize,

        /// Valores que não podem sair no sorteio
        #[clap(long, value_delimiter = ',')]
        exclude: Vec<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()>
{
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command
    {
        Command::Reverse { text } =>
        {
            println!("{}", strings::reverse_str(&text));
        },

        Command::Dedup { values } =>
        {
            for value in collections::remove_duplicate(&values)
            {
                println!("{}", value);
            }
        },

        Command::ClientIp { forwarded_for, real_ip, remote_addr } =>
        {
            let public = net::client_public_ip(
                forwarded_for.as_deref(),
                real_ip.as_deref(),
                &remote_addr,
            );
            let direct = net::client_ip(
                forwarded_for.as_deref(),
                real_ip.as_deref(),
                &remote_addr,
            );

            match public
            {
                Some(ip) => println!("{}: {}", "IP público".green(), ip),
                None => println!("{}", "Nenhum IP público encontrado".yellow()),
            }
            if let Some(ip) = direct
            {
                println!("{}: {}", "Primeiro IP".cyan(), ip);
            }
        },

        Command::Query { url, name } => match name
        {
            Some(name) => match urls::get_query_string(&url, &name)
            {
                Some(value) => println!("{}", value),
                None => println!("{}", format!("Parâmetro {} não encontrado", name).yellow()),
            },
            None =>
            {
                let object = urls::get_query_object(&url)?;
                println!("{}", serde_json::to_string_pretty(&object)?);
            },
        },

        Command::SetArg { url, arg, value } =>
        {
            println!("{}", urls::change_url_arg(&url, &arg, &value)?);
        },

        Command::ServerTime { url } =>
        {
            let datetime = dates::server_datetime(&url)
                .await
                .with_context(|| format!("falha ao consultar {}", url))?;
            println!("{}: {}", "Hora do servidor".green(), datetime);
        },

        Command::Organize { src, dst } =>
        {
            let report = files::organize_by_month(&src, &dst)?;
            println!(
                "{}: {} movidos, {} ignorados",
                "Organização concluída".green().bold(),
                report.moved,
                report.skipped
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        },

        Command::GenPasswords { output, length, letters, digits, symbols, split_max } =>
        {
            // sem nenhuma flag de classe, usa o conjunto completo
            let charset = if !letters && !digits && !symbols
            {
                passwords::build_charset(true, true, true)?
            }
            else
            {
                passwords::build_charset(letters, digits, symbols)?
            };

            let iter = PasswordIter::new(&charset, length);
            let total = iter.total();
            if total > 100_000_000
            {
                warn!("{} combinações, isso pode demorar bastante", total);
            }

            let written = passwords::write_to_file(iter, &output)?;
            println!(
                "{}: {} senhas em {}",
                "Geração concluída".green().bold(),
                written,
                output.display()
            );

            if let Some(max_size) = split_max
            {
                let chunks = files::split_file(&output, max_size)?;
                for chunk in &chunks
                {
                    println!("Pedaço criado: {}", chunk.display());
                }
            }
        },

        Command::Split { path, max_size } =>
        {
            let chunks = files::split_file(&path, max_size)?;
            if chunks.is_empty()
            {
                println!("{}", "Arquivo dentro do limite, nada a fazer".yellow());
            }
            for chunk in &chunks
            {
                println!("Pedaço criado: {}", chunk.display());
            }
        },

        Command::Random { start, end, count, exclude } =>
        {
            let nums = random::gen_random_nums(start, end, count, &exclude)?;
            let formatted: Vec<String> = nums.iter().map(|n| n.to_string()).collect();
            println!("{}", formatted.join(" "));
        },
    }

    Ok(())
}
