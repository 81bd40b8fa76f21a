use crate::config::IdentifySettings;
use anyhow::{Context, Result, anyhow, bail};
use log::{debug, warn};
use regex::Regex;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::sync::LazyLock;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

static REGEX_DIMENSIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(\d+)$").expect("Invalid regex"));

/// 圖片像素尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// 取得圖片尺寸的能力
///
/// 預設實作呼叫 ImageMagick 的 `identify`，也可以換成原生解碼器，
/// 整理流程不需要跟著修改。
pub trait DimensionReader {
    /// 開始處理前確認工具可用
    fn check_available(&self) -> Result<()>;

    /// 讀取單一檔案的尺寸，失敗時回傳錯誤而不是中斷整個流程
    fn read_dimensions(&self, path: &Path) -> Result<Dimensions>;
}

/// 透過 `identify` 取得圖片尺寸
#[derive(Debug, Clone, Default)]
pub struct IdentifyReader {
    settings: IdentifySettings,
}

impl IdentifyReader {
    #[must_use]
    pub const fn new(settings: IdentifySettings) -> Self {
        Self { settings }
    }
}

impl DimensionReader for IdentifyReader {
    fn check_available(&self) -> Result<()> {
        let child = Command::new(&self.settings.program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("無法執行 {}", self.settings.program))?;

        // 只要能在時限內結束就視為可用，不檢查結束碼
        let output = wait_with_timeout(child, self.settings.version_timeout)?;
        debug!(
            "{} -version 結束碼: {:?}",
            self.settings.program,
            output.status.code()
        );
        Ok(())
    }

    fn read_dimensions(&self, path: &Path) -> Result<Dimensions> {
        let child = Command::new(&self.settings.program)
            .args(["-format", "%w %h"])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("無法執行 {}: {}", self.settings.program, path.display()))?;

        let output = wait_with_timeout(child, self.settings.read_timeout)
            .with_context(|| format!("讀取尺寸失敗: {}", path.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{} 執行失敗: {}", self.settings.program, stderr.trim());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_dimensions(&stdout)
            .ok_or_else(|| anyhow!("無法解析 {} 輸出: {:?}", self.settings.program, stdout))
    }
}

/// 等待子程序結束，超過時限則終止它
///
/// stdout/stderr 在等待期間由背景執行緒持續讀取，輸出超過管線緩衝區時子程序才不會卡住。
fn wait_with_timeout(mut child: Child, timeout: Duration) -> Result<Output> {
    let deadline = Instant::now() + timeout;
    let stdout_reader = child.stdout.take().map(spawn_pipe_reader);
    let stderr_reader = child.stderr.take().map(spawn_pipe_reader);

    loop {
        match child.try_wait().context("無法檢查程序狀態")? {
            Some(status) => {
                return Ok(Output {
                    status,
                    stdout: join_pipe_reader(stdout_reader),
                    stderr: join_pipe_reader(stderr_reader),
                });
            }
            None if Instant::now() >= deadline => {
                if let Err(e) = child.kill() {
                    warn!("無法終止逾時程序 [{}]: {e}", child.id());
                }
                if let Err(e) = child.wait() {
                    warn!("無法回收逾時程序 [{}]: {e}", child.id());
                }
                bail!("程序執行逾時 ({} 秒)", timeout.as_secs_f64());
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    }
}

fn spawn_pipe_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Err(e) = pipe.read_to_end(&mut buffer) {
            debug!("讀取程序輸出失敗: {e}");
        }
        buffer
    })
}

fn join_pipe_reader(reader: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    reader
        .map(|handle| handle.join().unwrap_or_default())
        .unwrap_or_default()
}

/// 解析 `"<寬> <高>"`，必須剛好兩個正整數
fn parse_dimensions(output: &str) -> Option<Dimensions> {
    let captures = REGEX_DIMENSIONS.captures(output.trim())?;
    let width: u32 = captures[1].parse().ok()?;
    let height: u32 = captures[2].parse().ok()?;

    if width == 0 || height == 0 {
        return None;
    }
    Some(Dimensions::new(width, height))
}
