use std::fs;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Local;
use log::debug;
use log::info;
use serde::Serialize;

use crate::dates::month_folder;
use crate::errors::UtilError;

/// Resumo de uma execução de `organize_by_month`.
#[derive(Debug, Serialize)]
pub struct OrganizeReport
{
    pub moved: usize,
    pub skipped: usize,
    pub folders: Vec<String>,
}

/// Move os arquivos de `src` para subpastas `AAAA-MM` de `dst`, escolhidas
/// pela data de modificação de cada arquivo. Subdiretórios de `src` não são
/// tocados. A pasta do mês é criada sob demanda.
pub fn organize_by_month(src: &Path, dst: &Path) -> Result<OrganizeReport, UtilError>
{
    if !src.is_dir()
    {
        return Err(UtilError::NotADirectory(src.to_path_buf()));
    }

    let mut report = OrganizeReport {
        moved: 0,
        skipped: 0,
        folders: Vec::new(),
    };

    for entry in fs::read_dir(src)?
    {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file()
        {
            report.skipped += 1;
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        let modified: DateTime<Local> = modified.into();
        let folder = month_folder(&modified);

        let target_dir = dst.join(&folder);
        if !target_dir.exists()
        {
            fs::create_dir_all(&target_dir)?;
        }

        let file_name = entry.file_name();
        let target = target_dir.join(&file_name);
        move_file(&path, &target)?;

        info!("{} -> {}", path.display(), target.display());
        report.moved += 1;
        if !report.folders.contains(&folder)
        {
            report.folders.push(folder);
        }
    }

    Ok(report)
}

/// rename só funciona dentro do mesmo filesystem; entre dispositivos
/// diferentes copia e remove o original.
fn move_file(from: &Path, to: &Path) -> Result<(), UtilError>
{
    if fs::rename(from, to).is_err()
    {
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(())
}

/// Reparte um arquivo maior que `max_size` bytes em pedaços numerados
/// `<arquivo>_<i>.txt`, devolvendo os caminhos criados. Um arquivo dentro do
/// limite não gera pedaço nenhum.
pub fn split_file(path: &Path, max_size: u64) -> Result<Vec<PathBuf>, UtilError>
{
    let file_size = fs::metadata(path)?.len();
    if file_size <= max_size
    {
        debug!("{} tem {} bytes, nada a repartir", path.display(), file_size);
        return Ok(Vec::new());
    }

    let mut input = fs::File::open(path)?;
    let mut buffer = vec![0u8; max_size as usize];
    let mut created = Vec::new();
    let mut index = 0;

    loop
    {
        let mut filled = 0;
        while filled < buffer.len()
        {
            let read = input.read(&mut buffer[filled..])?;
            if read == 0
            {
                break;
            }
            filled += read;
        }

        if filled == 0
        {
            break;
        }

        let chunk_path = PathBuf::from(format!("{}_{}.txt", path.display(), index));
        let mut chunk = fs::File::create(&chunk_path)?;
        chunk.write_all(&buffer[..filled])?;
        created.push(chunk_path);
        index += 1;
    }

    info!("{} repartido em {} pedaços", path.display(), created.len());
    Ok(created)
}

#[cfg(test)]
mod tests
{
    use std::fs;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf
    {
        let dir = std::env::temp_dir().join(format!("rust_utils_{}_{}", name, std::process::id()));
        if dir.exists()
        {
            fs::remove_dir_all(&dir).unwrap();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn moves_files_into_month_folders()
    {
        let root = scratch_dir("organize");
        let src = root.join("entrada");
        let dst = root.join("saida");
        fs::create_dir_all(&src).unwrap();

        fs::write(src.join("a.txt"), b"aaa").unwrap();
        fs::write(src.join("b.txt"), b"bbb").unwrap();
        fs::create_dir_all(src.join("subpasta")).unwrap();

        let report = organize_by_month(&src, &dst).unwrap();

        assert_eq!(report.moved, 2);
        assert_eq!(report.skipped, 1); // o subdiretório
        assert_eq!(report.folders.len(), 1);

        let month = &report.folders[0];
        assert!(dst.join(month).join("a.txt").is_file());
        assert!(dst.join(month).join("b.txt").is_file());
        assert!(!src.join("a.txt").exists());

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn organize_rejects_missing_source()
    {
        let root = scratch_dir("organize_missing");
        let result = organize_by_month(&root.join("nao_existe"), &root);
        assert!(matches!(result, Err(UtilError::NotADirectory(_))));
        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn splits_large_file_in_chunks()
    {
        let root = scratch_dir("split");
        let path = root.join("dados.bin");
        fs::write(&path, vec![7u8; 25]).unwrap();

        let chunks = split_file(&path, 10).unwrap();

        assert_eq!(chunks.len(), 3);
        assert_eq!(fs::read(&chunks[0]).unwrap().len(), 10);
        assert_eq!(fs::read(&chunks[1]).unwrap().len(), 10);
        assert_eq!(fs::read(&chunks[2]).unwrap().len(), 5);

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn small_file_is_left_alone()
    {
        let root = scratch_dir("split_small");
        let path = root.join("dados.bin");
        fs::write(&path, b"pequeno").unwrap();

        let chunks = split_file(&path, 1024).unwrap();
        assert!(chunks.is_empty());

        fs::remove_dir_all(&root).unwrap();
    }
}
