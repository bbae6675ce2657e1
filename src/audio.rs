use crate::core::{CaptureError, FrequencySource, ANALYSER_SMOOTHING_TIME_CONSTANT, FFT_SIZE};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Microphone routed into an `AnalyserNode`.
pub struct MicrophoneAnalyser {
    _ctx: web::AudioContext,
    _source: web::MediaStreamAudioSourceNode,
    analyser: web::AnalyserNode,
}

impl FrequencySource for MicrophoneAnalyser {
    fn bin_count(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    fn read_frequency_snapshot(&mut self, bins: &mut [u8]) -> Result<(), CaptureError> {
        let expected = self.bin_count();
        if bins.len() != expected {
            return Err(CaptureError::Snapshot(format!(
                "buffer holds {} bins, analyser has {}",
                bins.len(),
                expected
            )));
        }
        self.analyser.get_byte_frequency_data(bins);
        Ok(())
    }
}

/// Ask for microphone access and wire it to a fresh analyser.
pub async fn open_microphone() -> Result<MicrophoneAnalyser, CaptureError> {
    let window = web::window().ok_or(CaptureError::Unsupported)?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|_| CaptureError::Unsupported)?;

    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    let request = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(classify)?;
    let stream: web::MediaStream = JsFuture::from(request)
        .await
        .map_err(classify)?
        .dyn_into()
        .map_err(|_| CaptureError::NoDevice)?;

    let ctx = web::AudioContext::new().map_err(analyser_error)?;
    let analyser = web::AnalyserNode::new(&ctx).map_err(analyser_error)?;
    analyser.set_fft_size(FFT_SIZE);
    analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING_TIME_CONSTANT);
    let source = ctx
        .create_media_stream_source(&stream)
        .map_err(analyser_error)?;
    source
        .connect_with_audio_node(&analyser)
        .map_err(analyser_error)?;
    // Contexts created outside a gesture may start suspended.
    _ = ctx.resume();

    Ok(MicrophoneAnalyser {
        _ctx: ctx,
        _source: source,
        analyser,
    })
}

fn classify(err: JsValue) -> CaptureError {
    let name = js_sys::Reflect::get(&err, &JsValue::from_str("name"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    match name.as_str() {
        "NotAllowedError" | "SecurityError" => CaptureError::PermissionDenied,
        "NotFoundError" | "OverconstrainedError" => CaptureError::NoDevice,
        "NotSupportedError" | "TypeError" => CaptureError::Unsupported,
        _ => CaptureError::Analyser(format!("{:?}", err)),
    }
}

fn analyser_error(err: JsValue) -> CaptureError {
    CaptureError::Analyser(format!("{:?}", err))
}
