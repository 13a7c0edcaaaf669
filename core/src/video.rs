//! Per-frame brightness from a video file.
//!
//! Frames are decoded by an `ffmpeg` child process into raw 8-bit grayscale
//! and streamed through a pipe; [`FrameMaxes`] turns that byte stream into one
//! maximum pixel value per frame. Frame dimensions come from `ffprobe`.
//! The child is killed and reaped when the [`FfmpegSource`] is dropped, so the
//! decoder is released whether iteration finished, failed or was abandoned.

use crate::error::{DecodeError, Result};
use crate::types::FfmpegParams;
use log::{debug, info, warn};
use serde::Deserialize;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::thread::{self, JoinHandle};

/// Outcome of filling one frame buffer
enum FrameRead {
    Full,
    End,
    Partial(usize),
}

fn read_frame<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<FrameRead> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(FrameRead::End),
            Ok(0) => return Ok(FrameRead::Partial(filled)),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(FrameRead::Full)
}

/// Lazy sequence of the brightest pixel in each fixed-size grayscale frame.
///
/// Ends at a clean end of stream. A truncated final frame is logged and
/// dropped. A read error is yielded once and ends the sequence.
pub struct FrameMaxes<R> {
    reader: R,
    frame: Vec<u8>,
    frames_read: u64,
    finished: bool,
    failed: bool,
}

impl<R: Read> FrameMaxes<R> {
    pub fn new(reader: R, frame_len: usize) -> Self {
        Self {
            reader,
            frame: vec![0; frame_len],
            frames_read: 0,
            finished: frame_len == 0,
            failed: false,
        }
    }

    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the sequence ended on a read error rather than end of stream.
    pub fn failed(&self) -> bool {
        self.failed
    }
}

impl<R: Read> Iterator for FrameMaxes<R> {
    type Item = Result<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match read_frame(&mut self.reader, &mut self.frame) {
            Ok(FrameRead::Full) => {
                self.frames_read += 1;
                self.frame.iter().copied().max().map(Ok)
            }
            Ok(FrameRead::End) => {
                self.finished = true;
                None
            }
            Ok(FrameRead::Partial(len)) => {
                warn!(
                    "dropping truncated frame {} ({} of {} bytes)",
                    self.frames_read,
                    len,
                    self.frame.len()
                );
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                self.failed = true;
                Some(Err(e.into()))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct StreamList {
    #[serde(default)]
    streams: Vec<VideoStream>,
}

#[derive(Debug, Deserialize)]
struct VideoStream {
    width: u32,
    height: u32,
}

/// Width and height of the first video stream in `ffprobe -of json` output.
fn parse_stream_list(json: &[u8]) -> Result<(u32, u32)> {
    let list: StreamList = serde_json::from_slice(json)?;
    list
        .streams
        .first()
        .map(|stream| (stream.width, stream.height))
        .ok_or_else(|| DecodeError::Ffmpeg("no video stream found".to_string()))
}

fn video_dimensions(path: &Path, params: &FfmpegParams) -> Result<(u32, u32)> {
    let output = Command::new(&params.ffprobe_bin)
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height",
            "-of",
            "json",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| DecodeError::Ffmpeg(format!("failed to run {}: {e}", params.ffprobe_bin)))?;

    if !output.status.success() {
        return Err(DecodeError::Ffmpeg(format!(
            "ffprobe exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    parse_stream_list(&output.stdout)
}

/// Frame-maximum stream backed by an `ffmpeg` decoder process.
pub struct FfmpegSource {
    path: PathBuf,
    child: Child,
    frames: FrameMaxes<ChildStdout>,
    stderr: Option<JoinHandle<String>>,
    exit_checked: bool,
}

impl FfmpegSource {
    pub fn open(path: &Path, params: &FfmpegParams) -> Result<Self> {
        if !path.is_file() {
            return Err(DecodeError::VideoNotFound(path.to_path_buf()));
        }

        let (width, height) = video_dimensions(path, params)?;
        debug!("{}: {}x{} video stream", path.display(), width, height);

        let mut child = Command::new(&params.ffmpeg_bin)
            .args(["-v", "error", "-nostdin", "-i"])
            .arg(path)
            .args(["-map", "0:v:0", "-f", "rawvideo", "-pix_fmt", "gray", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DecodeError::Ffmpeg(format!("failed to run {}: {e}", params.ffmpeg_bin)))?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(DecodeError::Ffmpeg("ffmpeg stdout was not captured".to_string()));
        };

        // Drained on its own thread so a chatty decoder never blocks on it
        let stderr = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut text = String::new();
                let _ = pipe.read_to_string(&mut text);
                text
            })
        });

        info!("opened {}", path.display());
        let frame_len = width as usize * height as usize;
        Ok(Self {
            path: path.to_path_buf(),
            child,
            frames: FrameMaxes::new(stdout, frame_len),
            stderr,
            exit_checked: false,
        })
    }

    /// Reports a decoder failure once the frame stream has ended.
    fn check_exit(&mut self) -> Option<Result<u8>> {
        if self.exit_checked {
            return None;
        }
        self.exit_checked = true;

        if self.frames.failed() {
            // Nobody reads stdout any more; the read error was already reported
            let _ = self.child.kill();
            let _ = self.child.wait();
            return None;
        }

        match self.child.wait() {
            Ok(status) if status.success() => None,
            Ok(status) => {
                let mut message = format!(
                    "ffmpeg exited with {status} after {} frames",
                    self.frames.frames_read()
                );
                let diagnostic = self.take_stderr();
                if !diagnostic.is_empty() {
                    message.push_str(": ");
                    message.push_str(&diagnostic);
                }
                Some(Err(DecodeError::Ffmpeg(message)))
            }
            Err(e) => Some(Err(e.into())),
        }
    }

    /// Everything ffmpeg wrote to stderr. Only call once the child has exited.
    fn take_stderr(&mut self) -> String {
        self.stderr
            .take()
            .and_then(|reader| reader.join().ok())
            .map(|text| text.trim().to_string())
            .unwrap_or_default()
    }
}

impl Iterator for FfmpegSource {
    type Item = Result<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.frames.next() {
            Some(item) => Some(item),
            None => self.check_exit(),
        }
    }
}

impl Drop for FfmpegSource {
    fn drop(&mut self) {
        if !self.exit_checked {
            // Still running if iteration stopped early
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
        info!(
            "released {} after {} frames",
            self.path.display(),
            self.frames.frames_read()
        );
    }
}

/// Brightest pixel of every frame of the video at `path`, in order.
pub fn frame_maxes(path: &Path, params: &FfmpegParams) -> Result<FfmpegSource> {
    FfmpegSource::open(path, params)
}
