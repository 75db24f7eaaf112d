use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{error, info};

use super::{TranscodeError, Transcoder};

// 360p, width derived from the source aspect ratio.
const SCALE_FILTER: &str = "scale=-1:360";

pub struct FfmpegTranscoder {
    time_limit: Duration,
}

impl FfmpegTranscoder {
    pub fn new(time_limit: Duration) -> Self {
        Self { time_limit }
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        info!("🎞️ Transcoding {} -> {}", input.display(), output.display());

        let child = Command::new("ffmpeg")
            .arg("-i")
            .arg(input)
            .args(["-vf", SCALE_FILTER])
            .arg("-y") // overwrite
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let result = match timeout(self.time_limit, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                error!(
                    "ffmpeg exceeded {}s time limit, killing",
                    self.time_limit.as_secs()
                );
                return Err(TranscodeError::Timeout);
            }
        };

        if result.status.success() {
            info!("✅ Transcoding finished: {}", output.display());
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let last_line = stderr.lines().last().unwrap_or("unknown error");
            error!("ffmpeg exited with {}: {}", result.status, last_line);
            Err(TranscodeError::Failed(format!(
                "ffmpeg exited with {}",
                result.status
            )))
        }
    }
}
