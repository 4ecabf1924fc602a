//! # xtask - Автоматизация сборки проекта
//!
//! См. [`HELP_TEXT`] для списка команд.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use xshell::{Shell, cmd};

/// Текст справки для команды xtask.
pub const HELP_TEXT: &str = r#"xtask

Использование:
  cargo run -p xtask -- <команда>

Команды:
  help         Показать это сообщение
  fmt          Запустить rustfmt
  fmt-check    Проверить форматирование (CI)
  clippy       Запустить clippy (воркспейс)
  test         Запустить тесты, включая doctests и e2e (воркспейс)
  ci           Запустить fmt-check + clippy + test
  demo         Перевести выписки из фикстур csv2trn и слить журналы mrglent
"#;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let cmd = args.next().unwrap_or_else(|| "help".to_string());

    let sh = Shell::new()?;
    sh.change_dir(project_root()?);

    match cmd.as_str() {
        "help" | "-h" | "--help" => help(),
        "fmt" => Ok(cmd!(sh, "cargo fmt --all").run()?),
        "fmt-check" => Ok(cmd!(sh, "cargo fmt --all -- --check").run()?),
        "clippy" => clippy(&sh),
        "test" => test(&sh),
        "ci" => {
            cmd!(sh, "cargo fmt --all -- --check").run()?;
            clippy(&sh)?;
            test(&sh)
        }
        "demo" => demo(&sh),
        other => bail!("Неизвестная команда: {other}\n\nЗапустите: cargo run -p xtask -- help"),
    }
}

/// Показать сообщение справки.
fn help() -> Result<()> {
    println!("{HELP_TEXT}");
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    Ok(cmd!(sh, "cargo clippy --workspace --all-targets -- -D warnings").run()?)
}

/// Тесты воркспейса. Бинарники собираются заранее для e2e тестов.
fn test(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo build --workspace").run()?;
    cmd!(sh, "cargo test --workspace").run()?;
    Ok(())
}

/// Прогнать инструменты на фикстурах: выписки двух банков в один журнал.
///
/// Зеркальных записей в фикстурах csv2trn нет, поэтому mrglent здесь
/// только сортирует записи по дате.
fn demo(sh: &Shell) -> Result<()> {
    let fixtures = project_root()?.join("tools/csv2trn/tests/fixtures");
    let kiwibank_format = fixtures.join("kiwibank.xml");
    let kiwibank = fixtures.join("kiwibank.csv");
    let pcu_format = fixtures.join("pcu.xml");
    let pcu = fixtures.join("pcu.csv");

    let current = cmd!(
        sh,
        "cargo run --quiet -p csv2trn -- -f {kiwibank_format} -t Assets:Current -c NZD -i {kiwibank}"
    )
    .read()?;
    let saving =
        cmd!(sh, "cargo run --quiet -p csv2trn -- -f {pcu_format} -t Assets:Saving -c NZD -i {pcu}")
            .read()?;

    let journal = format!("{current}\n{saving}\n");
    let merged = cmd!(sh, "cargo run --quiet -p mrglent").stdin(journal).read()?;
    println!("{merged}");
    Ok(())
}

/// Корень воркспейса: родитель директории крейта xtask.
fn project_root() -> Result<PathBuf> {
    Ok(std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)?
        .parent()
        .context("CARGO_MANIFEST_DIR не имеет родительской директории")?
        .to_path_buf())
}
