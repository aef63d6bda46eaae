use std::ffi::c_void;

use callmap_common::error::{CallmapError, CallmapResult};
use callmap_model::ScreenRect;
use callmap_platform_core::{DisplayServer, WindowBackend, WindowHandle};
use windows::core::{BOOL, PWSTR};
use windows::Win32::Foundation::{CloseHandle, HWND, LPARAM, POINT, RECT};
use windows::Win32::Graphics::Dwm::{DwmGetWindowAttribute, DWMWA_CLOAKED};
use windows::Win32::Graphics::Gdi::ClientToScreen;
use windows::Win32::System::Threading::{
    OpenProcess, QueryFullProcessImageNameW, PROCESS_NAME_WIN32,
    PROCESS_QUERY_LIMITED_INFORMATION,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetClassNameW, GetClientRect, GetWindowTextLengthW, GetWindowTextW,
    GetWindowThreadProcessId, IsIconic, IsWindowVisible, SetForegroundWindow, ShowWindow,
    SW_RESTORE,
};

/// [`WindowBackend`] over the Win32 window list.
#[derive(Debug, Default)]
pub struct Win32Backend;

impl Win32Backend {
    pub fn new() -> Self {
        Self
    }
}

fn hwnd(handle: &WindowHandle) -> HWND {
    HWND(handle.id as usize as *mut c_void)
}

fn window_text(hwnd: HWND) -> String {
    let len = unsafe { GetWindowTextLengthW(hwnd) };
    if len <= 0 {
        return String::new();
    }
    let mut buf = vec![0u16; len as usize + 1];
    let copied = unsafe { GetWindowTextW(hwnd, &mut buf) };
    String::from_utf16_lossy(&buf[..copied.max(0) as usize])
}

fn is_cloaked(hwnd: HWND) -> bool {
    let mut cloaked: u32 = 0;
    let result = unsafe {
        DwmGetWindowAttribute(
            hwnd,
            DWMWA_CLOAKED,
            &mut cloaked as *mut u32 as *mut c_void,
            std::mem::size_of::<u32>() as u32,
        )
    };
    result.is_ok() && cloaked != 0
}

unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let windows = &mut *(lparam.0 as *mut Vec<WindowHandle>);
    if IsWindowVisible(hwnd).as_bool() && !is_cloaked(hwnd) {
        let title = window_text(hwnd);
        if !title.is_empty() {
            windows.push(WindowHandle {
                id: hwnd.0 as usize as u64,
                title,
            });
        }
    }
    BOOL::from(true)
}

fn class_name(hwnd: HWND) -> String {
    let mut buf = [0u16; 256];
    let len = unsafe { GetClassNameW(hwnd, &mut buf) };
    String::from_utf16_lossy(&buf[..len.max(0) as usize])
}

fn process_image_path(hwnd: HWND) -> CallmapResult<String> {
    let mut pid = 0u32;
    unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid as *mut u32)) };
    if pid == 0 {
        return Err(CallmapError::platform("Window has no owning process"));
    }

    let process = unsafe { OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) }
        .map_err(|e| CallmapError::platform(format!("OpenProcess({pid}) failed: {e}")))?;

    let mut buf = [0u16; 1024];
    let mut size = buf.len() as u32;
    let queried = unsafe {
        QueryFullProcessImageNameW(
            process,
            PROCESS_NAME_WIN32,
            PWSTR(buf.as_mut_ptr()),
            &mut size,
        )
    };
    unsafe {
        let _ = CloseHandle(process);
    }
    queried.map_err(|e| CallmapError::platform(format!("Process image lookup failed: {e}")))?;
    Ok(String::from_utf16_lossy(&buf[..size as usize]))
}

impl WindowBackend for Win32Backend {
    fn list_windows(&self) -> CallmapResult<Vec<WindowHandle>> {
        let mut windows: Vec<WindowHandle> = Vec::new();
        unsafe {
            EnumWindows(
                Some(collect_window),
                LPARAM(&mut windows as *mut Vec<WindowHandle> as isize),
            )
        }
        .map_err(|e| CallmapError::platform(format!("EnumWindows failed: {e}")))?;
        Ok(windows)
    }

    fn foreground(&self, handle: &WindowHandle) -> CallmapResult<()> {
        let hwnd = hwnd(handle);
        unsafe {
            if IsIconic(hwnd).as_bool() {
                let _ = ShowWindow(hwnd, SW_RESTORE);
            }
            if !SetForegroundWindow(hwnd).as_bool() {
                tracing::warn!(title = %handle.title, "SetForegroundWindow was refused");
            }
        }
        Ok(())
    }

    fn bounding_rect(&self, handle: &WindowHandle) -> CallmapResult<ScreenRect> {
        let hwnd = hwnd(handle);
        let mut client = RECT::default();
        unsafe { GetClientRect(hwnd, &mut client) }
            .map_err(|e| CallmapError::platform(format!("GetClientRect failed: {e}")))?;

        let mut origin = POINT { x: 0, y: 0 };
        if !unsafe { ClientToScreen(hwnd, &mut origin) }.as_bool() {
            return Err(CallmapError::platform("ClientToScreen failed"));
        }

        let width = (client.right - client.left).max(0) as u32;
        let height = (client.bottom - client.top).max(0) as u32;
        ScreenRect::new(origin.x, origin.y, width, height).ok_or_else(|| {
            CallmapError::platform(format!("Window '{}' has an empty client area", handle.title))
        })
    }

    fn capture_identity(&self, handle: &WindowHandle) -> CallmapResult<String> {
        let hwnd = hwnd(handle);
        let exe = process_image_path(hwnd)?;
        Ok(crate::capture_identity(
            &window_text(hwnd),
            &class_name(hwnd),
            &exe,
        ))
    }

    fn display_server(&self) -> DisplayServer {
        DisplayServer::Windows
    }
}
